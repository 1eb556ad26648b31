//! Gap detection over a sorted hourly timeline.
//!
//! The scan walks consecutive timestamp pairs and reports every interval
//! wider than the configured cadence threshold. Sorting is the caller's
//! responsibility; a stable sort keeps tied rows in input order so the
//! scan stays reproducible.

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Expected cadence of the hourly series.
pub const DEFAULT_GAP_THRESHOLD_HOURS: f64 = 1.0;

/// An interval between two consecutive observations exceeding the
/// expected cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Elapsed time between the two observations, in hours.
    pub hours: f64,
}

/// Lazily scan an ascending timestamp sequence for gaps.
///
/// Empty and single-element input produce no gaps.
pub fn scan(
    timestamps: &[NaiveDateTime],
    threshold_hours: f64,
) -> impl Iterator<Item = Gap> + '_ {
    timestamps
        .iter()
        .copied()
        .tuple_windows()
        .filter_map(move |(prev, next)| {
            let hours = (next - prev).num_seconds() as f64 / 3600.0;
            (hours > threshold_hours).then_some(Gap {
                start: prev,
                end: next,
                hours,
            })
        })
}

/// The collected gap list plus its summary count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub threshold_hours: f64,
    pub gaps: Vec<Gap>,
}

impl GapReport {
    pub fn scan(timestamps: &[NaiveDateTime], threshold_hours: f64) -> Self {
        Self {
            threshold_hours,
            gaps: scan(timestamps, threshold_hours).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.gaps.len()
    }
}
