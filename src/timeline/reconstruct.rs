//! Timestamp assembly from split calendar fields.
//!
//! Hourly exports carry year, month, day and hour as separate columns,
//! with the year often present only inside the export filename. A row is
//! usable when every field coerces to a finite integral number and the
//! combination names a real calendar instant. Unusable rows are dropped
//! at the row boundary and counted; they never abort the run.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::domain::{HourlyReading, RawHourlyRow};

/// Result of one reconstruction pass over a batch of raw rows.
#[derive(Debug, Clone)]
pub struct ReconstructionOutcome {
    pub readings: Vec<HourlyReading>,
    /// Rows dropped because a calendar field failed numeric coercion or
    /// the field combination was not a valid instant.
    pub dropped_rows: usize,
}

/// Reconstruct timestamps for a batch of raw hourly rows.
///
/// Order of surviving readings follows input order; the caller decides
/// when to sort.
pub fn reconstruct(rows: Vec<RawHourlyRow>) -> ReconstructionOutcome {
    let total = rows.len();
    let readings: Vec<HourlyReading> = rows.into_iter().filter_map(reconstruct_row).collect();
    let dropped_rows = total - readings.len();
    if dropped_rows > 0 {
        warn!(dropped_rows, total, "dropped hourly rows with unusable timestamps");
    }
    ReconstructionOutcome {
        readings,
        dropped_rows,
    }
}

fn reconstruct_row(row: RawHourlyRow) -> Option<HourlyReading> {
    let year = match row.year.as_deref() {
        Some(field) => coerce_integral(field)?.try_into().ok()?,
        None => year_from_filename(row.filename.as_deref()?)?,
    };
    let month = u32::try_from(coerce_integral(&row.month)?).ok()?;
    let day = u32::try_from(coerce_integral(&row.day)?).ok()?;
    let hour = u32::try_from(coerce_integral(&row.hour)?).ok()?;

    let timestamp = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)?;
    Some(HourlyReading {
        timestamp,
        measurements: row.measurements,
    })
}

/// Numeric coercion in the spirit of the upstream exports: calendar
/// columns are sometimes typed as floats ("3.0"). Anything non-finite or
/// non-integral is unusable.
fn coerce_integral(field: &str) -> Option<i64> {
    let value: f64 = field.trim().parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    Some(value as i64)
}

/// Date formats observed in export filenames, day-first variants ahead of
/// ISO.
const FILENAME_DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Recover a year from a filename-like field.
///
/// Tries to parse the trimmed field as a full date first; failing that,
/// falls back to the first embedded standalone four-digit number that
/// looks like a year.
fn year_from_filename(name: &str) -> Option<i32> {
    let trimmed = name.trim().trim_end_matches(".csv");
    for format in FILENAME_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.year());
        }
    }
    embedded_year(trimmed)
}

fn embedded_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    for start in 0..bytes.len().saturating_sub(3) {
        let window = &bytes[start..start + 4];
        if !window.iter().all(u8::is_ascii_digit) {
            continue;
        }
        // Standalone: not part of a longer digit run.
        let before_is_digit = start > 0 && bytes[start - 1].is_ascii_digit();
        let after_is_digit = bytes.get(start + 4).is_some_and(u8::is_ascii_digit);
        if before_is_digit || after_is_digit {
            continue;
        }
        let year: i32 = std::str::from_utf8(window).ok()?.parse().ok()?;
        if (1900..=2100).contains(&year) {
            return Some(year);
        }
    }
    None
}
