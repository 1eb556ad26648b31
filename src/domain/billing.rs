use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural billing-input errors. Unlike row-level parse failures,
/// these abort the run: aggregating over a reversed period would produce
/// silently wrong results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("billing period ends {ends_on} before it starts {starts_on}")]
    ReversedPeriod {
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    },
}

/// One invoice line: a provider-defined span of consecutive days with its
/// totals. Immutable once parsed from input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    /// Day count as stated on the statement. Decomposition trusts this
    /// value, not the date arithmetic.
    pub days: u32,
    /// Total consumption over the period, in kWh.
    pub kwh: f64,
    /// Total billed amount over the period.
    pub amount: f64,
    /// Single average temperature observation for the whole period.
    pub avg_temp_c: f64,
}

impl BillingPeriod {
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.ends_on < self.starts_on {
            return Err(BillingError::ReversedPeriod {
                starts_on: self.starts_on,
                ends_on: self.ends_on,
            });
        }
        Ok(())
    }
}
