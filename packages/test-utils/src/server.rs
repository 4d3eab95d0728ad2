//! Mock T8 server for client and CLI tests
//!
//! Provides a [`MockT8Server`] that simulates the `/waves` and `/spectra`
//! endpoints, including basic-auth checks.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{basic_auth, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{SpectrumFixture, WaveformFixture};

/// Matches `/{endpoint}/{machine}/{point}/{pmode}/{timestamp}`
fn measurement_path(endpoint: &str) -> String {
    format!(r"^/{}/[^/]+/[^/]+/[^/]+/-?[0-9]+$", endpoint)
}

/// Mock T8 server
///
/// This struct wraps a [`wiremock::MockServer`] and provides convenience methods
/// for mounting T8 responses.
///
/// # Example
///
/// ```rust,ignore
/// use t8_test_utils::{MockT8Server, WaveformFixture};
///
/// #[tokio::test]
/// async fn test_fetch() {
///     let server = MockT8Server::start().await;
///     server.mock_waveform_success(&WaveformFixture::default()).await;
///
///     // Configure your client with server.url(), server.user() and server.password()
/// }
/// ```
pub struct MockT8Server {
    server: MockServer,
    user: String,
    password: String,
}

impl MockT8Server {
    /// Start a new mock server with default credentials
    pub async fn start() -> Self {
        Self::start_with_credentials("test-user", "test-password").await
    }

    /// Start a new mock server expecting the given credentials
    pub async fn start_with_credentials(user: &str, password: &str) -> Self {
        Self {
            server: MockServer::start().await,
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Basic-auth user the mocks expect
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Basic-auth password the mocks expect
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Mount a successful `/waves` response
    pub async fn mock_waveform_success(&self, fixture: &WaveformFixture) {
        Mock::given(method("GET"))
            .and(path_regex(measurement_path("waves")))
            .and(basic_auth(self.user.as_str(), self.password.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixture.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Mount a successful `/spectra` response
    pub async fn mock_spectrum_success(&self, fixture: &SpectrumFixture) {
        Mock::given(method("GET"))
            .and(path_regex(measurement_path("spectra")))
            .and(basic_auth(self.user.as_str(), self.password.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixture.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Mount a plain-text response with `status` on both endpoints
    pub async fn mock_status(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/(waves|spectra)/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 response whose body is not valid JSON
    pub async fn mock_invalid_json(&self) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/(waves|spectra)/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
            .mount(&self.server)
            .await;
    }

    /// Mount a `/waves` response whose payload is not valid base64
    pub async fn mock_corrupt_waveform(&self) {
        Mock::given(method("GET"))
            .and(path_regex(measurement_path("waves")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": "invalid_base64",
                "factor": 1.0,
                "sample_rate": 2560.0
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a delayed response on both endpoints
    pub async fn mock_timeout(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/(waves|spectra)/"))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has received
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
