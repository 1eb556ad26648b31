use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::Season;

/// Marker distinguishing observed daily records from synthetic ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
pub enum Provenance {
    /// Derived from exactly one billing period.
    Historical,
    /// Drawn from a seasonal profile bucket plus noise.
    Projected,
}

/// One day of consumption, cost and temperature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Consumption in kWh.
    pub kwh: f64,
    /// Cost in the billing currency.
    pub amount: f64,
    /// Average temperature over the source period, in degrees Celsius.
    pub avg_temp_c: f64,
    pub provenance: Provenance,
}

impl DailyRecord {
    /// Season the record's date falls into.
    pub fn season(&self) -> Season {
        Season::from_date(self.date)
    }
}
