//! HTTP client for the stations and bookings API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::{Booking, Station};

use super::StationGateway;
use super::error::GatewayError;

/// Default base URL for the bookings API.
pub const DEFAULT_BASE_URL: &str = "https://605c94c36d85de00170da8b4.mockapi.io";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an undecodable body to keep for the error message.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL, without the `/stations` path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the bookings API.
///
/// No retries and no caching: every call is one request.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a new client with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn stations_url(&self) -> String {
        format!("{}/stations", self.base_url)
    }

    fn station_url(&self, station_id: &str) -> String {
        format!("{}/stations/{}", self.base_url, station_id)
    }

    fn booking_url(&self, station_id: &str, booking_id: &str) -> String {
        format!(
            "{}/stations/{}/bookings/{}",
            self.base_url, station_id, booking_id
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode {
            message: e.to_string(),
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        })
    }
}

impl StationGateway for HttpGateway {
    async fn list_stations(&self) -> Result<Vec<Station>, GatewayError> {
        self.get_json(self.http.get(self.stations_url())).await
    }

    async fn station(&self, station_id: &str) -> Result<Station, GatewayError> {
        self.get_json(self.http.get(self.station_url(station_id)))
            .await
    }

    async fn booking(&self, station_id: &str, booking_id: &str) -> Result<Booking, GatewayError> {
        self.get_json(self.http.get(self.booking_url(station_id, booking_id)))
            .await
    }

    async fn search_stations(&self, name: &str) -> Result<Vec<Station>, GatewayError> {
        let request = self.http.get(self.stations_url()).query(&[("name", name)]);
        self.get_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = GatewayConfig::new("http://localhost:8080/").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn urls() {
        let gateway = HttpGateway::new(GatewayConfig::new("http://api.test")).unwrap();
        assert_eq!(gateway.stations_url(), "http://api.test/stations");
        assert_eq!(gateway.station_url("456"), "http://api.test/stations/456");
        assert_eq!(
            gateway.booking_url("station-456", "booking-123"),
            "http://api.test/stations/station-456/bookings/booking-123"
        );
    }
}
