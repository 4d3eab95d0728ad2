//! T8 API error types

use t8_analysis::{AnalysisError, DecodeError};
use t8_shared_config::ConfigError;
use thiserror::Error;

/// T8 API client errors
#[derive(Error, Debug)]
pub enum T8Error {
    /// Client configuration is unusable
    #[error("invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    /// Invalid input provided to an API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Measurement datetime is not `YYYY-MM-DDTHH:MM:SS`
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request to T8 server timed out after {0} seconds")]
    Timeout(u64),

    /// Server answered with a non-200 status
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// JSON envelope could not be parsed
    #[error("Failed to parse T8 response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Encoded samples could not be decoded
    #[error("failed to decode {kind} data: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: DecodeError,
    },

    /// Decoded samples could not form a spectrum
    #[error("failed to build spectrum: {0}")]
    Analysis(#[from] AnalysisError),
}

impl T8Error {
    /// Create a decode error for the given payload kind
    pub fn decode(kind: &'static str, source: DecodeError) -> Self {
        Self::Decode { kind, source }
    }

    /// Check if the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status: 401 | 403, .. })
    }
}

/// Result type for T8 API operations
pub type T8Result<T> = Result<T, T8Error>;
