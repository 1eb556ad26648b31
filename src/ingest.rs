//! # CSV Boundary
//!
//! Readers for the two upstream exports. The hourly readings file is
//! comma-delimited with split calendar columns and the year recoverable
//! from a `Filename` column; the billing statement file is
//! semicolon-delimited with decimal commas. Locale normalization happens
//! here so the numeric core never sees a comma decimal separator.
//!
//! Both readers recover from bad rows by dropping and counting them;
//! only an unreadable header aborts.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::warn;

use crate::domain::{BillingPeriod, RawHourlyRow};

// Hourly export calendar columns.
const HOURLY_YEAR: &str = "Année";
const HOURLY_MONTH: &str = "mois";
const HOURLY_DAY: &str = "jour";
const HOURLY_HOUR: &str = "Heure";
const HOURLY_FILENAME: &str = "Filename";

// Billing statement columns.
const BILLING_START: &str = "Date de début";
const BILLING_END: &str = "Date de fin";
const BILLING_DAYS: &str = "Jour";
const BILLING_KWH: &str = "kWh";
const BILLING_AMOUNT: &str = "Montant ($)";
const BILLING_TEMP: &str = "Température moyenne (°C)";

const BILLING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Read raw hourly rows. No field validation happens here; timestamp
/// reconstruction owns the drop-and-count policy for calendar fields.
pub fn read_hourly_rows<R: Read>(reader: R) -> Result<Vec<RawHourlyRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        match result {
            Ok(record) => rows.push(record_to_hourly_row(&record, &headers)),
            Err(error) => warn!(%error, "skipping unreadable hourly record"),
        }
    }
    Ok(rows)
}

fn record_to_hourly_row(record: &StringRecord, headers: &StringRecord) -> RawHourlyRow {
    let get = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let mut measurements = BTreeMap::new();
    for (index, header) in headers.iter().enumerate() {
        let name = header.trim();
        if matches!(
            name,
            HOURLY_YEAR | HOURLY_MONTH | HOURLY_DAY | HOURLY_HOUR | HOURLY_FILENAME
        ) {
            continue;
        }
        let Some(value) = record.get(index).and_then(|v| v.trim().parse::<f64>().ok()) else {
            continue;
        };
        if value.is_finite() {
            measurements.insert(name.to_owned(), value);
        }
    }

    RawHourlyRow {
        year: get(HOURLY_YEAR).map(str::to_owned),
        month: get(HOURLY_MONTH).unwrap_or_default().to_owned(),
        day: get(HOURLY_DAY).unwrap_or_default().to_owned(),
        hour: get(HOURLY_HOUR).unwrap_or_default().to_owned(),
        filename: get(HOURLY_FILENAME).map(str::to_owned),
        measurements,
    }
}

/// Parsed billing statements plus the count of rows dropped on the way.
#[derive(Debug, Clone)]
pub struct BillingImport {
    pub periods: Vec<BillingPeriod>,
    pub dropped_rows: usize,
}

/// Read billing statements, dropping and counting unparsable rows.
pub fn read_billing_periods<R: Read>(reader: R) -> Result<BillingImport, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut periods = Vec::new();
    let mut dropped_rows = 0;
    for result in csv_reader.records() {
        let Ok(record) = result else {
            dropped_rows += 1;
            continue;
        };
        match record_to_period(&record, &headers) {
            Some(period) => periods.push(period),
            None => dropped_rows += 1,
        }
    }
    if dropped_rows > 0 {
        warn!(dropped_rows, "dropped unparsable billing rows");
    }
    Ok(BillingImport {
        periods,
        dropped_rows,
    })
}

/// Decimal commas in the export are normalized here.
fn parse_locale_f64(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().replace(',', ".").parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn record_to_period(record: &StringRecord, headers: &StringRecord) -> Option<BillingPeriod> {
    let get = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .and_then(|index| record.get(index))
    };

    let starts_on = NaiveDate::parse_from_str(get(BILLING_START)?.trim(), BILLING_DATE_FORMAT).ok()?;
    let ends_on = NaiveDate::parse_from_str(get(BILLING_END)?.trim(), BILLING_DATE_FORMAT).ok()?;

    let days_raw = parse_locale_f64(get(BILLING_DAYS)?)?;
    if days_raw < 0.0 || days_raw.fract() != 0.0 {
        return None;
    }

    Some(BillingPeriod {
        starts_on,
        ends_on,
        days: days_raw as u32,
        kwh: parse_locale_f64(get(BILLING_KWH)?)?,
        amount: parse_locale_f64(get(BILLING_AMOUNT)?)?,
        avg_temp_c: parse_locale_f64(get(BILLING_TEMP)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_rows_split_calendar_and_measurements() {
        let csv = "mois,jour,Heure,Filename,Production (MWh)\n\
                   3,1,0,05-04-2024,120.5\n\
                   3,1,1,05-04-2024,118.0\n";
        let rows = read_hourly_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "3");
        assert_eq!(rows[0].hour, "0");
        assert_eq!(rows[0].year, None);
        assert_eq!(rows[0].filename.as_deref(), Some("05-04-2024"));
        assert_eq!(rows[0].measurements["Production (MWh)"], 120.5);
    }

    #[test]
    fn test_hourly_year_column_wins_over_filename() {
        let csv = "Année,mois,jour,Heure,Load\n2023,1,2,3,42.0\n";
        let rows = read_hourly_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].year.as_deref(), Some("2023"));
        assert!(!rows[0].measurements.contains_key("Année"));
    }

    #[test]
    fn test_non_numeric_measurement_is_omitted() {
        let csv = "mois,jour,Heure,Quality\n3,1,0,bad\n";
        let rows = read_hourly_rows(csv.as_bytes()).unwrap();
        assert!(rows[0].measurements.is_empty());
    }

    #[test]
    fn test_billing_statement_with_decimal_commas() {
        let csv = "Date de début;Date de fin;Jour;kWh;Montant ($);Température moyenne (°C)\n\
                   2024-01-01;2024-01-05;4;1234,5;98,76;-10,5\n";
        let import = read_billing_periods(csv.as_bytes()).unwrap();
        assert_eq!(import.dropped_rows, 0);
        let period = &import.periods[0];
        assert_eq!(period.starts_on, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.ends_on, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(period.days, 4);
        assert_eq!(period.kwh, 1234.5);
        assert_eq!(period.amount, 98.76);
        assert_eq!(period.avg_temp_c, -10.5);
    }

    #[test]
    fn test_bad_billing_rows_are_dropped_and_counted() {
        let csv = "Date de début;Date de fin;Jour;kWh;Montant ($);Température moyenne (°C)\n\
                   2024-01-01;2024-01-05;4;1200;90,0;-10\n\
                   not-a-date;2024-02-05;30;900;70,0;-5\n\
                   2024-02-06;2024-03-05;28;abc;70,0;-5\n";
        let import = read_billing_periods(csv.as_bytes()).unwrap();
        assert_eq!(import.periods.len(), 1);
        assert_eq!(import.dropped_rows, 2);
    }

    #[test]
    fn test_fractional_day_count_is_dropped() {
        let csv = "Date de début;Date de fin;Jour;kWh;Montant ($);Température moyenne (°C)\n\
                   2024-01-01;2024-01-05;4,5;1200;90,0;-10\n";
        let import = read_billing_periods(csv.as_bytes()).unwrap();
        assert!(import.periods.is_empty());
        assert_eq!(import.dropped_rows, 1);
    }
}
