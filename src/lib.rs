//! # Meter Analyzer
//!
//! Batch analytics over irregular utility metering exports: reconstructs a
//! gap-annotated hourly timeline, reconciles billed amounts against a
//! two-tier tariff simulation, and extrapolates the decomposed daily
//! history into a multi-year stochastic projection.
//!
//! The crate is synchronous and batch-oriented. Each stage is a pure
//! function over immutable inputs; the pipeline wires them together and
//! returns a single [`pipeline::AnalysisReport`].

pub mod config;
pub mod domain;
pub mod export;
pub mod history;
pub mod ingest;
pub mod pipeline;
pub mod profile;
pub mod projection;
pub mod tariff;
pub mod telemetry;
pub mod timeline;
