//! # Two-Tier Tariff Simulation
//!
//! Residential statements bill a daily kWh allowance at a low rate and
//! everything above it at a high rate. This module recomputes each
//! statement from its consumption and day count so the billed amount can
//! be reconciled against a reference value. The reconciliation variance
//! is a reporting output only and is never fed back into the model.
//!
//! Rates are configuration inputs; the observed provider values live in
//! `config/default.toml`, never in code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::BillingPeriod;

/// Rates and allowance for a two-tier residential tariff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TariffSchedule {
    /// Rate applied up to the daily allowance, in currency per kWh.
    pub base_rate: f64,
    /// Rate applied beyond the daily allowance, in currency per kWh.
    pub high_rate: f64,
    /// Daily kWh quantity billed at the base rate.
    pub base_allowance_kwh_per_day: f64,
}

/// Consumption split at the allowance threshold for one statement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSplit {
    pub base_kwh: f64,
    pub excess_kwh: f64,
}

impl TariffSchedule {
    /// Split consumption at the allowance threshold for a period length.
    ///
    /// A zero-day period has a zero threshold, so the whole consumption
    /// lands in the excess tier; filtering degenerate periods is the
    /// caller's responsibility. Negative consumption is passed through
    /// unclamped.
    pub fn split(&self, total_kwh: f64, days: u32) -> TierSplit {
        let threshold_kwh = f64::from(days) * self.base_allowance_kwh_per_day;
        TierSplit {
            base_kwh: total_kwh.min(threshold_kwh),
            excess_kwh: (total_kwh - threshold_kwh).max(0.0),
        }
    }

    /// Simulated amount for a consumption total over a period length.
    pub fn simulate(&self, total_kwh: f64, days: u32) -> f64 {
        let split = self.split(total_kwh, days);
        split.base_kwh * self.base_rate + split.excess_kwh * self.high_rate
    }

    /// Recompute one statement and compare against its billed amount.
    pub fn reconcile(&self, period: &BillingPeriod) -> Reconciliation {
        let split = self.split(period.kwh, period.days);
        let simulated_amount =
            split.base_kwh * self.base_rate + split.excess_kwh * self.high_rate;
        Reconciliation {
            starts_on: period.starts_on,
            ends_on: period.ends_on,
            days: period.days,
            kwh: period.kwh,
            billed_amount: period.amount,
            base_kwh: split.base_kwh,
            excess_kwh: split.excess_kwh,
            simulated_amount,
            variance: period.amount - simulated_amount,
        }
    }
}

/// Billed-versus-simulated comparison for one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub days: u32,
    pub kwh: f64,
    pub billed_amount: f64,
    pub base_kwh: f64,
    pub excess_kwh: f64,
    pub simulated_amount: f64,
    /// `billed_amount - simulated_amount`. Positive means the provider
    /// billed more than the simulated reference.
    pub variance: f64,
}
