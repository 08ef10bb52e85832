// Engine settings, loaded from a JSON file or taken from defaults
use crate::error::EngineError;
use serde::Deserialize;
use shared::catalog::{get_currency_info, BASE_CURRENCY};
use shared::models::TimeFrame;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the settings file used by the binary.
pub const CONFIG_ENV_VAR: &str = "FX_ENGINE_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub base_currency: String,
    pub fetch_latency_ms: u64,
    pub history_latency_ms: u64,
    pub health_latency_ms: u64,
    /// Maximum relative move applied to each baseline rate per fetch.
    pub rate_fluctuation: f64,
    pub health_success_rate: f64,
    pub poll_interval_secs: u64,
    /// Pair and window the binary charts on every poll.
    pub history_target: String,
    pub history_time_frame: TimeFrame,
    /// Stop the polling loop after this many fetches; runs until Ctrl-C when unset.
    pub max_polls: Option<u32>,
    /// Seeds the mock generator for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            base_currency: BASE_CURRENCY.to_string(),
            fetch_latency_ms: 500,
            history_latency_ms: 300,
            health_latency_ms: 200,
            rate_fluctuation: 0.01,
            health_success_rate: 0.9,
            poll_interval_secs: 30,
            history_target: "EUR".to_string(),
            history_time_frame: TimeFrame::SevenDays,
            max_polls: None,
            seed: None,
        }
    }
}

impl EngineSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the file named by `FX_ENGINE_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self, EngineError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if get_currency_info(&self.base_currency).is_none() {
            return Err(EngineError::ConfigError(format!(
                "Unknown base currency '{}'",
                self.base_currency
            )));
        }
        if get_currency_info(&self.history_target).is_none() {
            return Err(EngineError::ConfigError(format!(
                "Unknown history target '{}'",
                self.history_target
            )));
        }
        if !(0.0..1.0).contains(&self.rate_fluctuation) {
            return Err(EngineError::ConfigError(format!(
                "rate_fluctuation must be in [0, 1), got {}",
                self.rate_fluctuation
            )));
        }
        if !(0.0..=1.0).contains(&self.health_success_rate) {
            return Err(EngineError::ConfigError(format!(
                "health_success_rate must be in [0, 1], got {}",
                self.health_success_rate
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(EngineError::ConfigError(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn history_latency(&self) -> Duration {
        Duration::from_millis(self.history_latency_ms)
    }

    pub fn health_latency(&self) -> Duration {
        Duration::from_millis(self.health_latency_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
