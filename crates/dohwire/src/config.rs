//! Command-line configuration.
//!
//! An optional YAML file supplies codec policies and logging settings.
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```yaml
//! codec:
//!   parse:
//!     trailing_data: strict
//!     retain_padding: false
//!   serialize:
//!     padding:
//!       block: 128
//!     max_message_size: 65535
//! logging:
//!   level: info
//!   format: json
//! ```

use crate::logging::LogFormat;
use dohwire_proto::header::HEADER_SIZE;
use dohwire_proto::{ParseConfig, SerializeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Codec policies.
    pub codec: CodecConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Codec policies for both directions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Options used when decoding.
    pub parse: ParseConfig,

    /// Options used when building queries.
    pub serialize: SerializeConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: String,

    /// Log format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Checks values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let max = self.codec.serialize.max_message_size;
        if !(HEADER_SIZE..=usize::from(u16::MAX)).contains(&max) {
            return Err(ConfigError::InvalidValue {
                field: "codec.serialize.max_message_size".to_string(),
                message: format!("{max} is outside {HEADER_SIZE}..=65535"),
            });
        }
        Ok(())
    }
}
