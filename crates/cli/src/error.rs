//! Error types for scenario configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write config file {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid {field} = {value}: expected {expected}")]
    InvalidParameter {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Unknown token symbol {0}")]
    UnknownToken(String),
}

impl ConfigError {
    pub fn invalid_parameter(field: &str, value: impl ToString, expected: &str) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;
