//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_engine::Delays;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings read from `noughts.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Milliseconds the adversary "thinks" before its mark appears.
    #[serde(default = "default_adversary_delay_ms")]
    adversary_delay_ms: u64,

    /// Milliseconds a finished round stays on screen before clearing.
    #[serde(default = "default_round_reset_delay_ms")]
    round_reset_delay_ms: u64,

    /// TOML file holding the stored player preference.
    #[serde(default)]
    #[setters(strip_option)]
    preferences: Option<PathBuf>,
}

fn default_adversary_delay_ms() -> u64 {
    500
}

fn default_round_reset_delay_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            adversary_delay_ms: default_adversary_delay_ms(),
            round_reset_delay_ms: default_round_reset_delay_ms(),
            preferences: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            adversary_delay_ms = config.adversary_delay_ms,
            round_reset_delay_ms = config.round_reset_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Session delays described by this config.
    pub fn delays(&self) -> Delays {
        Delays::new(
            Duration::from_millis(self.adversary_delay_ms),
            Duration::from_millis(self.round_reset_delay_ms),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
