//! Configuration for the activity visualizer.

use crate::dataset::{Dataset, DEFAULT_ACTIVITIES_FILE, DEFAULT_ADJACENCY_FILE};
use crate::ingest::DateNormalizer;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the two source files
    pub data_dir: PathBuf,

    /// Activities file name, relative to `data_dir`
    pub activities_file: String,

    /// Adjacency matrix file name, relative to `data_dir`
    pub adjacency_file: String,

    /// IANA zone that offset-carrying timestamps are converted into
    pub timezone: String,

    /// HTTP port for `serve`
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            activities_file: DEFAULT_ACTIVITIES_FILE.to_string(),
            adjacency_file: DEFAULT_ADJACENCY_FILE.to_string(),
            timezone: "UTC".to_string(),
            port: 4000,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Pretty JSON form, as shown by the `config` command.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("activity-visualizer")
            .join("config.json")
    }

    /// Parse the configured timezone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }

    /// Build the dataset this configuration points at.
    pub fn dataset(&self) -> Result<Dataset, ConfigError> {
        Ok(Dataset::new(
            self.data_dir.join(&self.activities_file),
            self.data_dir.join(&self.adjacency_file),
            DateNormalizer::new(self.timezone()?),
        ))
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    InvalidTimezone(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::InvalidTimezone(tz) => write!(f, "Unknown timezone: {tz}"),
        }
    }
}

impl std::error::Error for ConfigError {}
