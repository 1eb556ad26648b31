use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use meter_analyzer::{config, export, history, ingest, pipeline, telemetry};

use config::Config;
use history::ProjectionSummary;
use meter_analyzer::domain::Provenance;
use pipeline::AnalysisOptions;
use telemetry::init_tracing;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let hourly_file = File::open(&cfg.io.hourly_csv)
        .with_context(|| format!("opening hourly export {}", cfg.io.hourly_csv.display()))?;
    let hourly_rows = ingest::read_hourly_rows(hourly_file)?;

    let billing_file = File::open(&cfg.io.billing_csv)
        .with_context(|| format!("opening billing export {}", cfg.io.billing_csv.display()))?;
    let billing = ingest::read_billing_periods(billing_file)?;

    let options = AnalysisOptions {
        tariff: cfg.tariff.schedule(),
        gap_threshold_hours: cfg.gaps.threshold_hours,
        horizon_days: cfg.projection.horizon_days,
        noise: cfg.projection.noise(),
        random_seed: cfg.projection.random_seed,
    };
    let report = pipeline::run(hourly_rows, billing.periods, &options)?;

    for gap in &report.gap_report.gaps {
        info!(start = %gap.start, end = %gap.end, hours = gap.hours, "timeline gap");
    }

    let billed: f64 = report.reconciliations.iter().map(|r| r.billed_amount).sum();
    let simulated: f64 = report.reconciliations.iter().map(|r| r.simulated_amount).sum();
    info!(
        statements = report.reconciliations.len(),
        billed_total = billed,
        simulated_total = simulated,
        variance_total = billed - simulated,
        "tariff reconciliation"
    );

    let projected: Vec<_> = report
        .daily
        .iter()
        .filter(|record| record.provenance == Provenance::Projected)
        .cloned()
        .collect();
    let summary = ProjectionSummary::from_records(&projected);
    info!(
        total_kwh = summary.total_kwh,
        total_amount = summary.total_amount,
        mean_annual_amount = summary.mean_annual_amount,
        std_annual_amount = summary.std_annual_amount,
        "projection summary"
    );

    for (season, rollup) in history::seasonal(&report.daily) {
        info!(
            %season,
            kwh = rollup.kwh,
            amount = rollup.amount,
            avg_temp_c = rollup.avg_temp_c,
            days = rollup.day_count,
            "seasonal totals"
        );
    }

    ensure_parent_dir(&cfg.io.daily_out_csv)?;
    export::write_daily_records(File::create(&cfg.io.daily_out_csv)?, &report.daily)?;
    ensure_parent_dir(&cfg.io.reconciliation_out_csv)?;
    export::write_reconciliations(
        File::create(&cfg.io.reconciliation_out_csv)?,
        &report.reconciliations,
    )?;

    info!(
        daily_out = %cfg.io.daily_out_csv.display(),
        reconciliation_out = %cfg.io.reconciliation_out_csv.display(),
        "analysis complete"
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
