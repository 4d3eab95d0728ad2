//! T8 measurement server configuration

use std::fmt;

use url::Url;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Connection settings for a T8 measurement server
#[derive(Clone)]
pub struct ServerConfig {
    /// Server base URL (e.g., http://t8.example.com/rest)
    pub host: String,

    /// Basic-auth user
    pub user: String,

    /// Basic-auth password
    pub password: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Credentials come from `T8_CLIENT_USER` and `T8_CLIENT_PASSWORD`; both
    /// default to empty, which sends empty basic-auth credentials.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            host: get_env_or_default("T8_HOST", "http://localhost"),
            user: get_env_or_default("T8_CLIENT_USER", ""),
            password: get_env_or_default("T8_CLIENT_PASSWORD", ""),
            timeout_secs: parse_env("T8_TIMEOUT", 30)?,
            connect_timeout_secs: parse_env("T8_CONNECT_TIMEOUT", 10)?,
        })
    }

    /// Create a configuration with a custom host (useful for testing)
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Replace the basic-auth credentials
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Check that the host is an http(s) URL and timeouts are non-zero
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.host)
            .map_err(|e| ConfigError::InvalidUrl("T8_HOST".to_string(), e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(
                "T8_HOST".to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "T8_TIMEOUT must be greater than zero".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "T8_CONNECT_TIMEOUT must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL of the waveform endpoint
    pub fn waves_url(&self) -> String {
        format!("{}/waves", self.host.trim_end_matches('/'))
    }

    /// Base URL of the spectrum endpoint
    pub fn spectra_url(&self) -> String {
        format!("{}/spectra", self.host.trim_end_matches('/'))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".to_string(),
            user: String::new(),
            password: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
