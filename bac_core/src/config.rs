//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bac/config.toml`.

use crate::curve::{CurveSettings, DEFAULT_PADDING_HOURS, DEFAULT_SAMPLES};
use crate::{Error, Result, WidmarkModel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub curve: CurveConfig,
}

/// Widmark model parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_male_ratio")]
    pub male_ratio: f64,

    #[serde(default = "default_female_ratio")]
    pub female_ratio: f64,

    #[serde(default = "default_elimination_rate")]
    pub elimination_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            male_ratio: default_male_ratio(),
            female_ratio: default_female_ratio(),
            elimination_rate: default_elimination_rate(),
        }
    }
}

/// Decay-curve sampling parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,

    #[serde(default = "default_padding_hours")]
    pub padding_hours: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            padding_hours: default_padding_hours(),
        }
    }
}

// Default value functions
fn default_male_ratio() -> f64 {
    WidmarkModel::default().male_ratio
}

fn default_female_ratio() -> f64 {
    WidmarkModel::default().female_ratio
}

fn default_elimination_rate() -> f64 {
    WidmarkModel::default().elimination_rate
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_padding_hours() -> f64 {
    DEFAULT_PADDING_HOURS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("bac").join("config.toml")
    }

    /// Check every value is usable by the estimator
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("model.male_ratio", self.model.male_ratio),
            ("model.female_ratio", self.model.female_ratio),
        ];
        for (key, ratio) in ratios {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(Error::Config(format!(
                    "{} must be in (0, 1], got {}",
                    key, ratio
                )));
            }
        }
        if !(self.model.elimination_rate > 0.0) || !self.model.elimination_rate.is_finite() {
            return Err(Error::Config(format!(
                "model.elimination_rate must be positive, got {}",
                self.model.elimination_rate
            )));
        }
        if self.curve.samples < 2 {
            return Err(Error::Config(format!(
                "curve.samples must be at least 2, got {}",
                self.curve.samples
            )));
        }
        if !(self.curve.padding_hours >= 0.0) || !self.curve.padding_hours.is_finite() {
            return Err(Error::Config(format!(
                "curve.padding_hours must be zero or more, got {}",
                self.curve.padding_hours
            )));
        }
        Ok(())
    }

    /// Model parameters for the estimator
    pub fn widmark_model(&self) -> WidmarkModel {
        WidmarkModel {
            male_ratio: self.model.male_ratio,
            female_ratio: self.model.female_ratio,
            elimination_rate: self.model.elimination_rate,
        }
    }

    /// Sampling parameters for the decay curve
    pub fn curve_settings(&self) -> CurveSettings {
        CurveSettings {
            samples: self.curve.samples,
            padding_hours: self.curve.padding_hours,
        }
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
