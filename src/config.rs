use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::projection::NoiseParams;
use crate::tariff::TariffSchedule;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub io: IoConfig,
    pub tariff: TariffConfig,
    pub gaps: GapConfig,
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IoConfig {
    pub hourly_csv: PathBuf,
    pub billing_csv: PathBuf,
    pub daily_out_csv: PathBuf,
    pub reconciliation_out_csv: PathBuf,
}

/// Tariff constants are caller-supplied configuration, never baked into
/// the simulation itself.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffConfig {
    pub base_rate: f64,
    pub high_rate: f64,
    pub base_allowance_kwh_per_day: f64,
}

impl TariffConfig {
    pub fn schedule(&self) -> TariffSchedule {
        TariffSchedule {
            base_rate: self.base_rate,
            high_rate: self.high_rate,
            base_allowance_kwh_per_day: self.base_allowance_kwh_per_day,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GapConfig {
    #[serde(default = "default_gap_threshold")]
    pub threshold_hours: f64,
}

fn default_gap_threshold() -> f64 {
    crate::timeline::DEFAULT_GAP_THRESHOLD_HOURS
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    pub consumption_noise_std: f64,
    pub temperature_noise_std: f64,
    /// Seed for the noise generator. Set for reproducible projections;
    /// leave unset to draw from entropy.
    pub random_seed: Option<u64>,
}

fn default_horizon_days() -> u32 {
    crate::projection::DEFAULT_HORIZON_DAYS
}

impl ProjectionConfig {
    pub fn noise(&self) -> NoiseParams {
        NoiseParams {
            consumption_noise_std: self.consumption_noise_std,
            temperature_noise_std: self.temperature_noise_std,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("METER__").split("__"));
        Ok(figment.extract()?)
    }
}
