//! TOML-based engine configuration.
//!
//! Tunables for the classifier thresholds, drill generator, and milestone
//! ladder. Every field has a serde default equal to the shipped behavior,
//! so a missing or partial file always loads.
//!
//! Configuration is stored at `~/.config/keyflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// Weak-key classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Samples required before a key shows up in the heatmap at all.
    #[serde(default = "default_min_samples")]
    pub min_samples: u64,
    /// Samples required before a key may be classified weak.
    #[serde(default = "default_weak_min_samples")]
    pub weak_min_samples: u64,
    /// Average latency above this is weak (ms).
    #[serde(default = "default_weak_latency_ms")]
    pub weak_latency_ms: f64,
    /// Error rate above this is weak.
    #[serde(default = "default_weak_error_rate")]
    pub weak_error_rate: f64,
    /// Keystroke samples slower than this are treated as pauses and dropped (ms).
    #[serde(default = "default_latency_cap_ms")]
    pub latency_cap_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            weak_min_samples: default_weak_min_samples(),
            weak_latency_ms: default_weak_latency_ms(),
            weak_error_rate: default_weak_error_rate(),
            latency_cap_ms: default_latency_cap_ms(),
        }
    }
}

/// Drill generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Target drill length in words.
    #[serde(default = "default_drill_words")]
    pub target_words: usize,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            target_words: default_drill_words(),
        }
    }
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/keyflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub drill: DrillConfig,
    /// WPM milestone ladder, ascending.
    #[serde(default = "default_ladder")]
    pub milestone_ladder: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            drill: DrillConfig::default(),
            milestone_ladder: default_ladder(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
            .join("config.toml"))
    }

    /// Load the configuration, or defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

fn default_min_samples() -> u64 {
    2
}

fn default_weak_min_samples() -> u64 {
    10
}

fn default_weak_latency_ms() -> f64 {
    250.0
}

fn default_weak_error_rate() -> f64 {
    0.15
}

fn default_latency_cap_ms() -> u64 {
    2000
}

fn default_drill_words() -> usize {
    40
}

fn default_ladder() -> Vec<u32> {
    vec![25, 50, 75, 100, 125, 150, 175, 200]
}
