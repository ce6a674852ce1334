//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::cache;
use crate::sim::engine::RunParams;
use crate::sim::types::{MAX_DAYS, MIN_DAYS};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon, policy, and seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Calling-layer cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Horizon, reduction policy, and random seed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate, in `[1, 30]`.
    pub days: usize,
    /// Share of the excess removed by the policy, in `[0, 100]`.
    pub reduction_percent: f64,
    /// Random seed. Omit for a fresh seed on every run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 7,
            reduction_percent: 50.0,
            seed: None,
        }
    }
}

/// Calling-layer cache settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of cached `(days, seed)` series (must be > 0).
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: cache::DEFAULT_CAPACITY,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Returns the baseline scenario: one week at 50% reduction.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Returns the single-day preset: 24 hours at 50% reduction.
    pub fn single_day() -> Self {
        Self {
            simulation: SimulationConfig {
                days: 1,
                ..SimulationConfig::default()
            },
            cache: CacheConfig::default(),
        }
    }

    /// Returns the month preset: the longest horizon at full reduction.
    pub fn month() -> Self {
        Self {
            simulation: SimulationConfig {
                days: MAX_DAYS,
                reduction_percent: 100.0,
                ..SimulationConfig::default()
            },
            cache: CacheConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "single_day", "month"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "single_day" => Ok(Self::single_day()),
            "month" => Ok(Self::month()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !(MIN_DAYS..=MAX_DAYS).contains(&s.days) {
            errors.push(ConfigError {
                field: "simulation.days".into(),
                message: format!("must be in [{MIN_DAYS}, {MAX_DAYS}], got {}", s.days),
            });
        }
        if !s.reduction_percent.is_finite() || !(0.0..=100.0).contains(&s.reduction_percent) {
            errors.push(ConfigError {
                field: "simulation.reduction_percent".into(),
                message: format!("must be in [0, 100], got {}", s.reduction_percent),
            });
        }
        if self.cache.capacity == 0 {
            errors.push(ConfigError {
                field: "cache.capacity".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }

    /// Converts the simulation section into validated engine parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first out-of-range field.
    pub fn run_params(&self) -> Result<RunParams, ConfigError> {
        let s = &self.simulation;
        RunParams::new(s.days, s.reduction_percent, s.seed).map_err(|e| ConfigError {
            field: format!("simulation.{}", e.field()),
            message: e.to_string(),
        })
    }
}
