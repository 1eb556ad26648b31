use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Astronomical season, northern-hemisphere convention.
///
/// Boundaries are the fixed calendar dates Mar 20, Jun 21, Sep 22 and
/// Dec 21. Classification is a pure function of the date so seasonal
/// roll-ups stay deterministic across years.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Classify a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match (date.month(), date.day()) {
            (1 | 2, _) => Season::Winter,
            (3, d) if d < 20 => Season::Winter,
            (3 | 4 | 5, _) => Season::Spring,
            (6, d) if d < 21 => Season::Spring,
            (6 | 7 | 8, _) => Season::Summer,
            (9, d) if d < 22 => Season::Summer,
            (9 | 10 | 11, _) => Season::Autumn,
            (12, d) if d < 21 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}
