//! # Daily History
//!
//! Turns multi-day billing periods into a day-resolution history and
//! provides the calendar roll-ups consumed by reporting.
//!
//! ## Components
//!
//! - **decompose**: expands one billing period into one record per
//!   covered day, in equal shares
//! - **aggregate**: pure monthly/yearly/seasonal reductions over daily
//!   records, plus the projection summary statistics

pub mod aggregate;
pub mod decompose;

pub use aggregate::{
    monthly, seasonal, seasonal_by_year, yearly, ProjectionSummary, Rollup,
};
pub use decompose::decompose;
