//! Calendar roll-ups over daily records.
//!
//! Every aggregation is a pure reduction: sum for consumption and cost,
//! arithmetic mean for temperature, grouped by the relevant calendar
//! key. Nothing here mutates the source records, so roll-ups can be
//! recomputed freely over any slice (historical, projected, or both).

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::{DailyRecord, Season};

/// Summed consumption and cost with mean temperature for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rollup {
    pub kwh: f64,
    pub amount: f64,
    pub avg_temp_c: f64,
    pub day_count: usize,
}

fn fold_by<K, F>(records: &[DailyRecord], key: F) -> BTreeMap<K, Rollup>
where
    K: Ord,
    F: Fn(&DailyRecord) -> K,
{
    let mut groups: BTreeMap<K, Rollup> = BTreeMap::new();
    for record in records {
        let rollup = groups.entry(key(record)).or_default();
        rollup.kwh += record.kwh;
        rollup.amount += record.amount;
        // Running temperature sum; turned into a mean below.
        rollup.avg_temp_c += record.avg_temp_c;
        rollup.day_count += 1;
    }
    for rollup in groups.values_mut() {
        rollup.avg_temp_c /= rollup.day_count as f64;
    }
    groups
}

/// Roll up by calendar month, keyed `(year, month)`.
pub fn monthly(records: &[DailyRecord]) -> BTreeMap<(i32, u32), Rollup> {
    fold_by(records, |r| (r.date.year(), r.date.month()))
}

/// Roll up by calendar year.
pub fn yearly(records: &[DailyRecord]) -> BTreeMap<i32, Rollup> {
    fold_by(records, |r| r.date.year())
}

/// Roll up by season across all years.
pub fn seasonal(records: &[DailyRecord]) -> BTreeMap<Season, Rollup> {
    fold_by(records, DailyRecord::season)
}

/// Roll up by season within each year.
pub fn seasonal_by_year(records: &[DailyRecord]) -> BTreeMap<(i32, Season), Rollup> {
    fold_by(records, |r| (r.date.year(), r.season()))
}

/// Headline figures over a projected span: lifetime totals plus the mean
/// and spread of the per-year cost.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary {
    pub total_kwh: f64,
    pub total_amount: f64,
    pub mean_annual_amount: f64,
    /// Sample standard deviation of the annual cost totals.
    pub std_annual_amount: f64,
}

impl ProjectionSummary {
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let total_kwh = records.iter().map(|r| r.kwh).sum();
        let total_amount = records.iter().map(|r| r.amount).sum();

        let annual: Vec<f64> = yearly(records).values().map(|r| r.amount).collect();
        let mean_annual_amount = if annual.is_empty() {
            0.0
        } else {
            annual.iter().sum::<f64>() / annual.len() as f64
        };
        let std_annual_amount = if annual.len() < 2 {
            0.0
        } else {
            let variance = annual
                .iter()
                .map(|amount| (amount - mean_annual_amount).powi(2))
                .sum::<f64>()
                / (annual.len() - 1) as f64;
            variance.sqrt()
        };

        Self {
            total_kwh,
            total_amount,
            mean_annual_amount,
            std_annual_amount,
        }
    }
}
