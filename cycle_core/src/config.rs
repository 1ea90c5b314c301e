//! Configuration file support for Luna.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/luna/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub phases: PhaseRules,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Phase boundary constants used by the classifier
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseRules {
    /// Days of menstruation counted from the cycle start
    #[serde(default = "default_period_length")]
    pub period_length: u32,

    /// Ovulation window opens this many days before the cycle end (+1)
    #[serde(default = "default_ovulation_window_start_offset")]
    pub ovulation_window_start_offset: u32,

    /// Ovulation window closes this many days before the cycle end (+1)
    #[serde(default = "default_ovulation_window_end_offset")]
    pub ovulation_window_end_offset: u32,
}

impl Default for PhaseRules {
    fn default() -> Self {
        Self {
            period_length: default_period_length(),
            ovulation_window_start_offset: default_ovulation_window_start_offset(),
            ovulation_window_end_offset: default_ovulation_window_end_offset(),
        }
    }
}

impl PhaseRules {
    /// Reject constant combinations that would leave the ovulation window
    /// empty or inverted.
    pub fn validate(&self) -> Result<()> {
        if self.period_length == 0 {
            return Err(Error::Config("period_length must be at least 1".into()));
        }
        if self.ovulation_window_end_offset == 0 {
            return Err(Error::Config(
                "ovulation_window_end_offset must be at least 1".into(),
            ));
        }
        if self.ovulation_window_start_offset <= self.ovulation_window_end_offset {
            return Err(Error::Config(format!(
                "ovulation_window_start_offset ({}) must be greater than ovulation_window_end_offset ({})",
                self.ovulation_window_start_offset, self.ovulation_window_end_offset
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("luna")
}

fn default_period_length() -> u32 {
    5
}

fn default_ovulation_window_start_offset() -> u32 {
    16
}

fn default_ovulation_window_end_offset() -> u32 {
    12
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.phases.validate()
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("luna").join("config.toml")
    }

    /// Path of the persisted cycle profile inside the data directory
    pub fn profile_path(data_dir: &Path) -> PathBuf {
        data_dir.join("period_data.json")
    }
}
