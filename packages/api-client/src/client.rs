//! T8 REST client implementation

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use t8_analysis::Waveform;
use t8_shared_config::ServerConfig;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{T8Error, T8Result};
use crate::models::{MeasurementQuery, ServerSpectrum, SpectrumResponse, WaveformResponse};
use crate::time::iso_to_timestamp;

/// Maximum size of error response body to include in error messages
const MAX_ERROR_BODY_SIZE: usize = 1024;

/// Client for the T8 waveform and spectrum endpoints
#[derive(Debug, Clone)]
pub struct T8Client {
    http_client: Client,
    config: ServerConfig,
}

impl T8Client {
    /// Create a new T8 client
    ///
    /// # Errors
    /// - `T8Error::Config` if the host or timeouts are invalid
    /// - `T8Error::Http` if the HTTP client cannot be built
    pub fn new(config: &ServerConfig) -> T8Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("t8-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Fetch and decode the waveform of a measurement
    ///
    /// Samples are returned already multiplied by the server's scale factor.
    #[instrument(skip(self), fields(machine = %query.machine, point = %query.point))]
    pub async fn get_waveform(&self, query: &MeasurementQuery) -> T8Result<Waveform> {
        let url = self.measurement_url(&self.config.waves_url(), query)?;
        let response: WaveformResponse = self.fetch_json(url).await?;
        let waveform = response.into_waveform()?;

        debug!(
            samples = waveform.len(),
            sample_rate = waveform.sample_rate(),
            duration_secs = waveform.duration_secs(),
            "Fetched waveform"
        );

        Ok(waveform)
    }

    /// Fetch and decode the server-computed spectrum of a measurement
    #[instrument(skip(self), fields(machine = %query.machine, point = %query.point))]
    pub async fn get_spectrum(&self, query: &MeasurementQuery) -> T8Result<ServerSpectrum> {
        let url = self.measurement_url(&self.config.spectra_url(), query)?;
        let response: SpectrumResponse = self.fetch_json(url).await?;
        let spectrum = response.into_server_spectrum()?;

        debug!(
            bins = spectrum.spectrum.len(),
            fmin = spectrum.fmin,
            fmax = spectrum.fmax,
            "Fetched spectrum"
        );

        Ok(spectrum)
    }

    /// Build `{base}/{machine}/{point}/{pmode}/{timestamp}`
    fn measurement_url(&self, base: &str, query: &MeasurementQuery) -> T8Result<Url> {
        let machine = validate_segment("machine", &query.machine)?;
        let point = validate_segment("point", &query.point)?;
        let pmode = validate_segment("pmode", &query.pmode)?;
        let timestamp = iso_to_timestamp(&query.datetime)?.to_string();

        let mut url = Url::parse(base).map_err(|e| T8Error::InvalidInput(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| T8Error::InvalidInput(format!("{} cannot be a base URL", base)))?
            .extend([machine, point, pmode, timestamp.as_str()]);

        Ok(url)
    }

    /// Issue an authenticated GET and parse a JSON body
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> T8Result<T> {
        debug!(url = %url, "Requesting T8 endpoint");

        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = truncate_error_body(response.text().await.unwrap_or_default());
            warn!(status = status.as_u16(), "T8 server returned an error status");
            return Err(T8Error::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| self.map_request_error(e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn map_request_error(&self, error: reqwest::Error) -> T8Error {
        if error.is_timeout() {
            T8Error::Timeout(self.timeout_limit(error.is_connect()))
        } else {
            T8Error::Http(error)
        }
    }

    /// The limit that expired: connecting has its own, shorter budget
    fn timeout_limit(&self, during_connect: bool) -> u64 {
        if during_connect {
            self.config.connect_timeout_secs
        } else {
            self.config.timeout_secs
        }
    }
}

/// Reject path segments that are empty or would split the path
fn validate_segment<'a>(name: &str, value: &'a str) -> T8Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(T8Error::InvalidInput(format!("{} cannot be empty", name)));
    }
    if trimmed.contains('/') {
        return Err(T8Error::InvalidInput(format!(
            "{} cannot contain '/': {}",
            name, trimmed
        )));
    }
    Ok(trimmed)
}

/// Truncate error body to prevent memory issues with large error responses
fn truncate_error_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_SIZE {
        return body;
    }

    let truncate_at = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
        .last()
        .unwrap_or(0);

    format!("{}... (truncated)", &body[..truncate_at])
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const FIXTURE: &str = "eJxjZPj//389QwMAEP4D/g==";

    fn query() -> MeasurementQuery {
        MeasurementQuery::new("LP_Turbine", "MAD31CY005", "AM1", "2019-04-11T18:25:54")
    }

    fn client_for(server: &MockServer) -> T8Client {
        let config = ServerConfig::with_host(server.uri()).with_credentials("user", "pass");
        T8Client::new(&config).unwrap()
    }

    #[test]
    fn test_client_rejects_invalid_host() {
        let config = ServerConfig::with_host("not a url");
        assert_matches!(T8Client::new(&config), Err(T8Error::Config(_)));
    }

    #[test]
    fn test_client_debug_redacts_password() {
        let config = ServerConfig::default().with_credentials("user", "top-secret");
        let client = T8Client::new(&config).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("top-secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_timeout_limit_matches_expired_phase() {
        let mut config = ServerConfig::default();
        config.timeout_secs = 30;
        config.connect_timeout_secs = 5;
        let client = T8Client::new(&config).unwrap();

        assert_eq!(client.timeout_limit(true), 5);
        assert_eq!(client.timeout_limit(false), 30);
    }

    #[test]
    fn test_measurement_url() {
        let config = ServerConfig::with_host("http://t8.local/rest/");
        let client = T8Client::new(&config).unwrap();
        let url = client
            .measurement_url(&config.waves_url(), &query())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://t8.local/rest/waves/LP_Turbine/MAD31CY005/AM1/1555007154"
        );
    }

    #[test]
    fn test_measurement_url_encodes_segments() {
        let client = T8Client::new(&ServerConfig::default()).unwrap();
        let query = MeasurementQuery::new("LP Turbine", "P1", "AM1", "2019-04-11T18:25:54");
        let url = client
            .measurement_url(&client.config().waves_url(), &query)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost/waves/LP%20Turbine/P1/AM1/1555007154"
        );
    }

    #[test]
    fn test_validate_segment() {
        assert_matches!(validate_segment("machine", "  "), Err(T8Error::InvalidInput(_)));
        assert_matches!(validate_segment("point", "a/b"), Err(T8Error::InvalidInput(_)));
        assert_matches!(validate_segment("pmode", " AM1 "), Ok("AM1"));
    }

    #[test]
    fn test_truncate_error_body() {
        let short = "short error".to_string();
        assert_eq!(truncate_error_body(short.clone()), short);

        let long = "x".repeat(MAX_ERROR_BODY_SIZE + 100);
        let truncated = truncate_error_body(long);
        assert!(truncated.ends_with("... (truncated)"));
        assert!(truncated.len() < MAX_ERROR_BODY_SIZE + 100);
    }

    #[test]
    fn test_truncate_error_body_utf8_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY_SIZE);
        let truncated = truncate_error_body(body);
        assert!(truncated.ends_with("... (truncated)"));
    }

    #[tokio::test]
    async fn test_get_waveform_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/waves/LP_Turbine/MAD31CY005/AM1/1555007154"))
            // base64("user:pass")
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": FIXTURE,
                "factor": 0.5,
                "sample_rate": 2560.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let waveform = client_for(&server).get_waveform(&query()).await.unwrap();
        assert_eq!(waveform.samples(), &[0.5, -0.5, 16383.5, -16384.0]);
        assert_eq!(waveform.sample_rate(), 2560.0);
    }

    #[tokio::test]
    async fn test_get_spectrum() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spectra/LP_Turbine/MAD31CY005/AM1/1555007154"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": FIXTURE,
                "factor": 1.0,
                "min_freq": 10.0,
                "max_freq": 40.0
            })))
            .mount(&server)
            .await;

        let server_spectrum = client_for(&server).get_spectrum(&query()).await.unwrap();
        assert_eq!(server_spectrum.fmin, 10.0);
        assert_eq!(server_spectrum.fmax, 40.0);
        assert_eq!(
            server_spectrum.spectrum.frequencies(),
            &[10.0, 20.0, 30.0, 40.0]
        );
        assert_eq!(
            server_spectrum.spectrum.magnitudes(),
            &[1.0, -1.0, 32767.0, -32768.0]
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such measurement"))
            .mount(&server)
            .await;

        let result = client_for(&server).get_waveform(&query()).await;
        assert_matches!(
            result,
            Err(T8Error::UnexpectedStatus { status: 404, body }) if body == "no such measurement"
        );
    }

    #[tokio::test]
    async fn test_invalid_timestamp_sends_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let query = MeasurementQuery::new("m", "p", "AM1", "2019-04-11T18:25:54Z");
        let result = client_for(&server).get_waveform(&query).await;
        assert_matches!(result, Err(T8Error::InvalidTimestamp { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = ServerConfig {
            timeout_secs: 1,
            ..ServerConfig::with_host(server.uri())
        };
        let result = T8Client::new(&config)
            .unwrap()
            .get_waveform(&query())
            .await;
        assert_matches!(result, Err(T8Error::Timeout(1)));
    }
}
