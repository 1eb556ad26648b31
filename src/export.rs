//! CSV output of the enriched tables: the per-statement reconciliation
//! and the combined historical-plus-projected daily sequence.

use std::io::Write;

use anyhow::Result;

use crate::domain::DailyRecord;
use crate::tariff::Reconciliation;

/// Write the combined daily sequence with provenance and season tags.
pub fn write_daily_records<W: Write>(writer: W, records: &[DailyRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", "kwh", "amount", "avg_temp_c", "provenance", "season"])?;
    for record in records {
        csv_writer.write_record([
            record.date.to_string(),
            format!("{:.6}", record.kwh),
            format!("{:.6}", record.amount),
            format!("{:.2}", record.avg_temp_c),
            record.provenance.to_string(),
            record.season().to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the per-statement reconciliation table.
pub fn write_reconciliations<W: Write>(
    writer: W,
    reconciliations: &[Reconciliation],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "starts_on",
        "ends_on",
        "days",
        "kwh",
        "billed_amount",
        "base_kwh",
        "excess_kwh",
        "simulated_amount",
        "variance",
    ])?;
    for reconciliation in reconciliations {
        csv_writer.write_record([
            reconciliation.starts_on.to_string(),
            reconciliation.ends_on.to_string(),
            reconciliation.days.to_string(),
            format!("{:.3}", reconciliation.kwh),
            format!("{:.2}", reconciliation.billed_amount),
            format!("{:.3}", reconciliation.base_kwh),
            format!("{:.3}", reconciliation.excess_kwh),
            format!("{:.2}", reconciliation.simulated_amount),
            format!("{:.2}", reconciliation.variance),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;
    use chrono::NaiveDate;

    #[test]
    fn test_daily_record_csv_shape() {
        let records = vec![DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            kwh: 50.0,
            amount: 3.45,
            avg_temp_c: -10.0,
            provenance: Provenance::Historical,
        }];
        let mut buffer = Vec::new();
        write_daily_records(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,kwh,amount,avg_temp_c,provenance,season"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-01-15,50.000000,3.450000,-10.00,Historical,Winter"
        );
    }

    #[test]
    fn test_reconciliation_csv_shape() {
        let reconciliations = vec![Reconciliation {
            starts_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ends_on: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            days: 4,
            kwh: 200.0,
            billed_amount: 15.0,
            base_kwh: 160.0,
            excess_kwh: 40.0,
            simulated_amount: 15.32,
            variance: -0.32,
        }];
        let mut buffer = Vec::new();
        write_reconciliations(&mut buffer, &reconciliations).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("2024-01-01,2024-01-05,4,200.000,15.00,160.000,40.000,15.32,-0.32"));
    }
}
