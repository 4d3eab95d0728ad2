//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Server URL is malformed or uses an unsupported scheme
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),

    /// Values parsed but are unusable together
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
