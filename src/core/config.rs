use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::monitor::PowerProfile;

fn default_grid_emission_factor() -> f64 {
    400.0
}

fn default_polling_interval_seconds() -> u64 {
    5
}

fn default_history_capacity() -> usize {
    60
}

fn default_min_samples() -> usize {
    10
}

fn default_anomaly_factor() -> f64 {
    1.3
}

/// Persistent configuration for the monitoring pipeline.
///
/// All values are read once at startup; CLI flags override individual
/// fields for the current run without touching the stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grid carbon intensity in grams of CO2 per kWh consumed
    #[serde(default = "default_grid_emission_factor")]
    pub grid_emission_factor: f64,
    /// Seconds between metric collection ticks
    #[serde(default = "default_polling_interval_seconds")]
    pub polling_interval_seconds: u64,
    /// Rolling-window size for trend and anomaly analysis
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Minimum retained records before the rolling mean is considered usable
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    /// Multiplier over the rolling mean above which power draw is flagged
    #[serde(default = "default_anomaly_factor")]
    pub anomaly_factor: f64,
    /// Power-model coefficients (includes the PUE multiplier)
    #[serde(default)]
    pub power: PowerProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_emission_factor: default_grid_emission_factor(),
            polling_interval_seconds: default_polling_interval_seconds(),
            history_capacity: default_history_capacity(),
            min_samples: default_min_samples(),
            anomaly_factor: default_anomaly_factor(),
            power: PowerProfile::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        // A corrupt or outdated file falls back to defaults rather than
        // blocking startup (the format may change between versions)
        Ok(serde_json::from_str(&data).unwrap_or_default())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(&config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("ecotop").join("config.json"))
    }

    /// Set a configuration value by key name, as used by `ecotop config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "grid-emission-factor" => {
                self.grid_emission_factor = parse_positive(key, value)?;
            }
            "pue" => {
                let pue: f64 = parse_positive(key, value)?;
                if pue < 1.0 {
                    anyhow::bail!("pue must be >= 1.0, got {}", pue);
                }
                self.power.pue = pue;
            }
            "polling-interval-seconds" => {
                let interval: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid value for {}: {}", key, value))?;
                if interval == 0 {
                    anyhow::bail!("polling-interval-seconds must be at least 1");
                }
                self.polling_interval_seconds = interval;
            }
            "history-capacity" => {
                let capacity: usize = value
                    .parse()
                    .with_context(|| format!("Invalid value for {}: {}", key, value))?;
                if capacity == 0 {
                    anyhow::bail!("history-capacity must be at least 1");
                }
                self.history_capacity = capacity;
            }
            "min-samples" => {
                let min_samples: usize = value
                    .parse()
                    .with_context(|| format!("Invalid value for {}: {}", key, value))?;
                if min_samples == 0 {
                    anyhow::bail!("min-samples must be at least 1");
                }
                self.min_samples = min_samples;
            }
            "anomaly-factor" => {
                self.anomaly_factor = parse_positive(key, value)?;
            }
            "cpu-coefficient-w" => {
                self.power.cpu_coefficient_w = parse_positive(key, value)?;
            }
            "cpu-frequency-fallback-ghz" => {
                self.power.cpu_frequency_fallback_ghz = parse_positive(key, value)?;
            }
            "memory-w-per-gb" => {
                self.power.memory_w_per_gb = parse_positive(key, value)?;
            }
            "disk-active-w" => {
                self.power.disk_active_w = parse_positive(key, value)?;
            }
            "disk-idle-w" => {
                self.power.disk_idle_w = parse_positive(key, value)?;
            }
            _ => anyhow::bail!(
                "Unknown configuration key: {} (run 'ecotop config show' for the full list)",
                key
            ),
        }

        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", key, value))?;

    if !parsed.is_finite() || parsed <= 0.0 {
        anyhow::bail!("{} must be a positive number, got {}", key, value);
    }

    Ok(parsed)
}
