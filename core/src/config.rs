use crate::{
    error::{ThermostatError, ThermostatResult},
    types::{Money, DEFAULT_COST_THRESHOLD, DEFAULT_SEED},
};
use serde::{Deserialize, Serialize};

/// Run configuration. Every field has a default, so a config file
/// only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub seed: u64,
    pub num_customers: usize,
    pub cost_threshold: Money,
    pub delinquency_probability: f64,
    pub max_days_delinquent: u32,
    pub device_prices: Vec<Money>,
    /// Device value is recovered over this many monthly payments.
    pub months_per_device: u32,
    pub year: i32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            num_customers: 20,
            cost_threshold: DEFAULT_COST_THRESHOLD,
            delinquency_probability: 0.25,
            max_days_delinquent: 65,
            device_prices: vec![800.0, 1200.0, 2000.0, 3000.0],
            months_per_device: 12,
            year: 2024,
        }
    }
}

impl ThermostatConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!(
            "config: loaded {path} (seed={}, customers={}, threshold={})",
            config.seed,
            config.num_customers,
            config.cost_threshold
        );
        Ok(config)
    }

    pub fn validate(&self) -> ThermostatResult<()> {
        if self.device_prices.is_empty() {
            return Err(ThermostatError::InvalidConfig(
                "device_prices must not be empty".into(),
            ));
        }
        if let Some(p) = self
            .device_prices
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(ThermostatError::InvalidConfig(format!(
                "device price {p} must be finite and >= 0"
            )));
        }
        if !(0.0..=1.0).contains(&self.delinquency_probability) {
            return Err(ThermostatError::InvalidConfig(format!(
                "delinquency_probability {} outside [0, 1]",
                self.delinquency_probability
            )));
        }
        if self.months_per_device == 0 {
            return Err(ThermostatError::InvalidConfig(
                "months_per_device must be > 0".into(),
            ));
        }
        if chrono::NaiveDate::from_ymd_opt(self.year, 1, 1).is_none() {
            return Err(ThermostatError::InvalidConfig(format!(
                "year {} is out of range",
                self.year
            )));
        }
        if !self.cost_threshold.is_finite() || self.cost_threshold < 0.0 {
            return Err(ThermostatError::InvalidThreshold(self.cost_threshold));
        }
        Ok(())
    }
}
