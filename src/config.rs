use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub tuner: TunerConfig,
    pub training: TrainingConfig,
}

/// Model location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the trained model file; `None` uses the default data path.
    pub path: Option<PathBuf>,
}

/// Penalty tuner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TunerConfig {
    /// Target fraction of held-out tokens the corrector may change.
    pub target_broken_percent: f64,
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of corpus sentences reserved for penalty tuning.
    pub held_out_fraction: f64,
    /// Cap on the number of reserved sentences.
    pub held_out_cap: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            target_broken_percent: defaults::TARGET_BROKEN_PERCENT,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            held_out_fraction: defaults::HELD_OUT_FRACTION,
            held_out_cap: defaults::HELD_OUT_CAP,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - TYPOFIX_MODEL → model.path
    /// - TYPOFIX_TARGET_BROKEN → tuner.target_broken_percent
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("TYPOFIX_MODEL")
            && !model.is_empty()
        {
            self.model.path = Some(PathBuf::from(model));
        }

        if let Ok(target) = std::env::var("TYPOFIX_TARGET_BROKEN")
            && let Ok(target) = target.parse::<f64>()
        {
            self.tuner.target_broken_percent = target;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/typofix/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("typofix")
            .join("config.toml")
    }

    /// Get the default model file path
    ///
    /// Returns ~/.local/share/typofix/model.bin on Linux
    pub fn default_model_path() -> PathBuf {
        dirs::data_dir()
            .expect("Could not determine data directory")
            .join("typofix")
            .join(defaults::MODEL_FILENAME)
    }
}
