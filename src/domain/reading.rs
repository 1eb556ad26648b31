use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An hourly input row as handed over by the ingestion layer, before
/// timestamp reconstruction. Calendar fields arrive as raw text because
/// upstream exports type them inconsistently (integers, floats, blanks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHourlyRow {
    /// Year column, when the export carries one directly.
    pub year: Option<String>,
    pub month: String,
    pub day: String,
    pub hour: String,
    /// Source filename for the row. Exports that lack a year column
    /// encode the export date (and therefore the year) here.
    pub filename: Option<String>,
    /// All remaining numeric columns, keyed by header.
    pub measurements: BTreeMap<String, f64>,
}

/// A reconstructed hourly observation. Only rows whose calendar fields
/// combine into a valid instant become readings; everything else is
/// dropped before gap analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyReading {
    pub timestamp: NaiveDateTime,
    pub measurements: BTreeMap<String, f64>,
}
