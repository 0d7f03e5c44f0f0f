//! Stored player preferences backed by a TOML file.

use derive_more::{Display, Error};
use noughts_engine::PreferenceStore;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Preferences read once from a flat TOML table.
///
/// Scalar values are kept as strings, so `player = "0"` and `player = 0`
/// read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePreferences {
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Parses preferences from TOML text.
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<Self, PreferenceError> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| PreferenceError::new(format!("Failed to parse preferences: {}", e)))?;

        let mut values = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Float(f) => f.to_string(),
                other => {
                    warn!(%key, kind = other.type_str(), "Skipping non-scalar preference");
                    continue;
                }
            };
            values.insert(key, text);
        }

        debug!(count = values.len(), "Preferences parsed");
        Ok(Self { values })
    }

    /// Reads preferences from a file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PreferenceError::new(format!("Failed to read preferences: {}", e)))?;
        Self::parse(&content)
    }

    /// Reads `path` when given and present; no stored values otherwise.
    #[instrument]
    pub fn load_or_empty(path: Option<&Path>) -> Result<Self, PreferenceError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(_) => {
                info!("Preferences file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Preference file error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preference error: {} at {}:{}", message, file, line)]
pub struct PreferenceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferenceError {
    /// Creates a new preference error.
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
