//! # Batch Pipeline
//!
//! Wires the stages together in one synchronous pass: reconstruct the
//! hourly timeline and scan it for gaps, reconcile and decompose the
//! billing statements, build the seasonal profile, then extend the
//! history with the stochastic projection. Each stage consumes immutable
//! input and hands an immutable artifact to the next; nothing is mutated
//! across stage boundaries.
//!
//! Row-level parse failures are recovered (dropped and counted) inside
//! their stage. Structural failures, a reversed billing period or an
//! empty history, abort the run instead of producing silently wrong
//! aggregates.

use anyhow::Result;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::{BillingPeriod, DailyRecord, HourlyReading, RawHourlyRow};
use crate::history::decompose;
use crate::profile::SeasonalProfile;
use crate::projection::{NoiseParams, Projector};
use crate::tariff::{Reconciliation, TariffSchedule};
use crate::timeline::{reconstruct, GapReport};

/// Everything the run needs besides the input tables. The observed
/// provider values come in through configuration.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub tariff: TariffSchedule,
    pub gap_threshold_hours: f64,
    pub horizon_days: u32,
    pub noise: NoiseParams,
    pub random_seed: Option<u64>,
}

/// The combined output of one batch run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Hourly rows dropped during timestamp reconstruction.
    pub dropped_hourly_rows: usize,
    /// Valid hourly readings in ascending timestamp order.
    pub readings: Vec<HourlyReading>,
    pub gap_report: GapReport,
    /// One billed-versus-simulated comparison per statement.
    pub reconciliations: Vec<Reconciliation>,
    pub profile: SeasonalProfile,
    /// Historical daily records followed by the projected ones, each
    /// tagged with its provenance.
    pub daily: Vec<DailyRecord>,
}

/// Run the full analysis over the two input tables.
pub fn run(
    hourly_rows: Vec<RawHourlyRow>,
    periods: Vec<BillingPeriod>,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    // Hourly path: reconstruct, sort, scan. The sort is stable so rows
    // with equal timestamps keep their input order.
    let outcome = reconstruct(hourly_rows);
    let dropped_hourly_rows = outcome.dropped_rows;
    let mut readings = outcome.readings;
    readings.sort_by_key(|reading| reading.timestamp);

    let timestamps: Vec<_> = readings.iter().map(|r| r.timestamp).collect();
    let gap_report = GapReport::scan(&timestamps, options.gap_threshold_hours);
    info!(
        readings = readings.len(),
        dropped = dropped_hourly_rows,
        gaps = gap_report.count(),
        "hourly timeline reconstructed"
    );

    // Billing path: structural validation first, then per-statement
    // reconciliation and daily decomposition.
    for period in &periods {
        period.validate()?;
    }
    let reconciliations: Vec<_> = periods
        .iter()
        .map(|period| options.tariff.reconcile(period))
        .collect();
    let mut daily: Vec<DailyRecord> = periods.iter().flat_map(|p| decompose(p)).collect();
    info!(
        periods = periods.len(),
        historical_days = daily.len(),
        "billing statements decomposed"
    );

    let profile = SeasonalProfile::build(&daily)?;

    // Projection starts the day after the last covered statement day.
    // A populated history implies at least one period, so the maximum
    // end date exists whenever the profile build succeeded.
    let latest_end = periods
        .iter()
        .map(|period| period.ends_on)
        .max()
        .ok_or(crate::profile::ProfileError::EmptyHistory)?;
    let start_date = latest_end + Duration::days(1);

    let projector = Projector::new(options.noise)?;
    let mut rng = match options.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let projected = projector.project(&profile, start_date, options.horizon_days, &mut rng)?;
    info!(
        start = %start_date,
        horizon_days = options.horizon_days,
        "projection complete"
    );
    daily.extend(projected);

    Ok(AnalysisReport {
        dropped_hourly_rows,
        readings,
        gap_report,
        reconciliations,
        profile,
        daily,
    })
}
