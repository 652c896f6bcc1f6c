//! Configuration
//!
//! Loaded from a JSON file; every key is optional.
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "log_level": "info",
//!   "failure_policy": "first",
//!   "pattern_size_limit": 1048576
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::{AttributeValidator, FailurePolicy, DEFAULT_PATTERN_SIZE_LIMIT};
use crate::observability::Severity;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid log_level: {0}")]
    LogLevel(String),

    #[error("pattern_size_limit must be > 0")]
    PatternSizeLimit,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of product type schema files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Minimum log severity
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `first` or `all`
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Compiled-size cap for text patterns, in bytes
    #[serde(default = "default_pattern_size_limit")]
    pub pattern_size_limit: usize,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pattern_size_limit() -> usize {
    DEFAULT_PATTERN_SIZE_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            log_level: default_log_level(),
            failure_policy: FailurePolicy::default(),
            pattern_size_limit: default_pattern_size_limit(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.severity()?;

        if self.pattern_size_limit == 0 {
            return Err(ConfigError::PatternSizeLimit);
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level.parse().map_err(ConfigError::LogLevel)
    }

    /// Builds a validator honoring this configuration
    pub fn validator(&self) -> AttributeValidator {
        AttributeValidator::new().with_pattern_size_limit(self.pattern_size_limit)
    }
}
