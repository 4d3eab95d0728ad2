//! Error handling for the T8 client binary
//!
//! Every failure in a run funnels into [`CliError`], which is logged once at
//! the top level with a severity matching its cause.

use std::path::PathBuf;

use t8_analysis::AnalysisError;
use t8_api_client::T8Error;
use t8_shared_config::ConfigError;
use thiserror::Error;

/// Errors that abort a client run
#[derive(Error, Debug)]
pub enum CliError {
    // ========== Setup Errors ==========
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    // ========== Fetch Errors ==========
    /// The T8 server could not deliver a measurement
    #[error("T8 API error: {0}")]
    Api(#[from] T8Error),

    // ========== Analysis Errors ==========
    /// The fetched waveform could not be analyzed
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    // ========== Output Errors ==========
    /// An artifact could not be written
    #[error("failed to write '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be serialized
    #[error("failed to serialize {artifact}: {source}")]
    Serialization {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Critical,
    Error,
    Warning,
}

impl CliError {
    /// Create an output error for the given path
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Get a severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(_) | Self::Output { .. } | Self::Serialization { .. } => {
                ErrorSeverity::Critical
            }
            // Rejected credentials fail every retry
            Self::Api(e) if e.is_unauthorized() => ErrorSeverity::Critical,
            Self::Api(T8Error::Timeout(_) | T8Error::Http(_)) => ErrorSeverity::Warning,
            Self::Api(_) | Self::Analysis(_) => ErrorSeverity::Error,
        }
    }

    /// Get the pipeline stage this error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Api(T8Error::Config(_)) => "config",
            Self::Api(_) => "fetch",
            Self::Analysis(_) => "analysis",
            Self::Output { .. } | Self::Serialization { .. } => "output",
        }
    }

    /// Log the error with appropriate severity
    pub fn log(&self) {
        let stage = self.stage();
        match self.severity() {
            ErrorSeverity::Critical => {
                tracing::error!(error = %self, stage = stage, "Critical client error");
            }
            ErrorSeverity::Error => {
                tracing::error!(error = %self, stage = stage, "Client run failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(error = %self, stage = stage, "T8 server unreachable");
            }
        }
    }
}

/// Result type alias for client runs
pub type CliResult<T> = Result<T, CliError>;
