//! Station directory API client.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::opt_coordinate;

use super::error::StationError;

/// Default URL of the long-haul station directory.
const DEFAULT_BASE_URL: &str = "https://api-v3.amtraker.com/v3/stations";

/// A station as the directory service sends it.
///
/// `code` may be missing; the directory is a map and the record is then
/// only identified by its key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "opt_coordinate", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "opt_coordinate", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Directory payload: some key → station record.
pub type DirectoryPayload = HashMap<String, StationDto>;

/// Source of the full station directory.
///
/// Implemented by [`DirectoryClient`] for the live service; tests provide
/// in-memory sources.
pub trait DirectorySource {
    /// Fetch every station in the directory.
    fn fetch_all(
        &self,
    ) -> impl std::future::Future<Output = Result<DirectoryPayload, StationError>> + Send;
}

/// Configuration for the station directory client.
#[derive(Debug, Clone)]
pub struct DirectoryClientConfig {
    /// URL returning the full directory
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryClientConfig {
    /// Create a config pointing at the public directory.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DirectoryClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the station directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a new directory client.
    pub fn new(config: DirectoryClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl DirectorySource for DirectoryClient {
    async fn fetch_all(&self) -> Result<DirectoryPayload, StationError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let payload: DirectoryPayload =
            serde_json::from_str(&body).map_err(|e| StationError::Json {
                message: e.to_string(),
            })?;

        debug!(stations = payload.len(), "fetched station directory");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_json;

    #[test]
    fn config_defaults() {
        let config = DirectoryClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = DirectoryClientConfig::new()
            .with_base_url("http://localhost:8080/stations")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080/stations");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn dto_tolerates_missing_fields() {
        let dto: StationDto = serde_json::from_str(r#"{"name": "New York Penn Station"}"#).unwrap();
        assert_eq!(dto.code, None);
        assert_eq!(dto.city, "");
        assert_eq!(dto.lat, None);
    }

    #[tokio::test]
    async fn fetches_directory_map() {
        let body = serde_json::json!({
            "NYP": {"name": "New York Penn Station", "city": "New York", "state": "NY", "lat": "40.75", "lon": "-73.99"},
            "WAS": {"code": "WAS", "name": "Washington DC Union", "lat": 38.90, "lon": -77.01}
        });
        let url = serve_json("/stations", 200, body).await;
        let client =
            DirectoryClient::new(DirectoryClientConfig::new().with_base_url(format!("{url}/stations")))
                .unwrap();

        let payload = client.fetch_all().await.unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["NYP"].lat, Some(40.75));
        assert_eq!(payload["WAS"].code.as_deref(), Some("WAS"));
    }

    #[tokio::test]
    async fn non_success_is_an_api_error() {
        let url = serve_json("/stations", 503, serde_json::json!({"error": "down"})).await;
        let client =
            DirectoryClient::new(DirectoryClientConfig::new().with_base_url(format!("{url}/stations")))
                .unwrap();

        match client.fetch_all().await {
            Err(StationError::Api { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
