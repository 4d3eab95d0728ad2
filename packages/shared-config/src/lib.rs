//! Shared configuration types for the T8 client
//!
//! This crate provides the configuration used by the API client and the
//! command-line driver. Everything is read from environment variables, with
//! defaults suitable for a local setup.

mod error;
mod server;

pub use error::{ConfigError, ConfigResult};
pub use server::ServerConfig;

use std::env;
use std::path::PathBuf;

/// Common configuration shared by the client crates
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Measurement server configuration
    pub server: ServerConfig,

    /// Directory receiving output artifacts
    pub output_dir: PathBuf,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            output_dir: PathBuf::from(get_env_or_default("T8_OUTPUT_DIR", "output")),
        })
    }
}

/// Log filter directives from `RUST_LOG`, falling back to `LOG_LEVEL`
///
/// Returns `None` when neither is set, leaving the default to the binary.
pub fn log_directives() -> Option<String> {
    env::var("RUST_LOG")
        .or_else(|_| env::var("LOG_LEVEL"))
        .ok()
        .filter(|directives| !directives.trim().is_empty())
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
