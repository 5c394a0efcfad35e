//! TfL Unified API HTTP client.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Arrival, StopId};

use super::TransitSource;
use super::convert::convert_arrivals;
use super::error::TflError;
use super::types::{ArrivalPrediction, StopPoint, StopPointsResponse};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Optional application key, sent as the `app_key` query parameter.
    /// The API works anonymously at a lower rate limit.
    pub app_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config for anonymous access to the production API.
    pub fn new() -> Self {
        Self {
            app_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// URL of the stop list endpoint for the given modes.
    fn stop_points_url(&self, modes: &[String]) -> String {
        format!("{}/StopPoint/Mode/{}", self.base_url, modes.join(","))
    }

    /// URL of the arrivals endpoint for one stop.
    fn arrivals_url(&self, stop: &StopId) -> String {
        format!("{}/StopPoint/{}/Arrivals", self.base_url, stop.as_str())
    }

    /// Fetch all stop records for the given modes.
    pub async fn get_stop_points(&self, modes: &[String]) -> Result<Vec<StopPoint>, TflError> {
        let response: StopPointsResponse = self.get_json(&self.stop_points_url(modes)).await?;
        Ok(response.stop_points)
    }

    /// Fetch arrival predictions for a stop.
    pub async fn get_arrivals(&self, stop: &StopId) -> Result<Vec<Arrival>, TflError> {
        let predictions: Vec<ArrivalPrediction> = self.get_json(&self.arrivals_url(stop)).await?;
        Ok(convert_arrivals(predictions))
    }

    /// GET a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TflError> {
        debug!(url, "GET");

        let mut request = self.http.get(url);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TflError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TflError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TransitSource for TflClient {
    fn stop_points<'a>(
        &'a self,
        modes: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<StopPoint>, TflError>> {
        Box::pin(self.get_stop_points(modes))
    }

    fn arrivals<'a>(&'a self, stop: &'a StopId) -> BoxFuture<'a, Result<Vec<Arrival>, TflError>> {
        Box::pin(self.get_arrivals(stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TflConfig::new()
            .with_app_key("secret")
            .with_base_url("http://localhost:8080/")
            .with_timeout(5);

        assert_eq!(config.app_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = TflConfig::default();

        assert_eq!(config.app_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn endpoint_urls() {
        let client = TflClient::new(TflConfig::new()).unwrap();

        let modes = vec!["tube".to_string(), "dlr".to_string()];
        assert_eq!(
            client.stop_points_url(&modes),
            "https://api.tfl.gov.uk/StopPoint/Mode/tube,dlr"
        );

        let stop = StopId::parse("940GZZLUOXC").unwrap();
        assert_eq!(
            client.arrivals_url(&stop),
            "https://api.tfl.gov.uk/StopPoint/940GZZLUOXC/Arrivals"
        );
    }

    #[test]
    fn decode_arrivals_payload() {
        let json = r#"[
            {"id":"-1","lineName":"Central","lineId":"central","destinationName":"Epping Underground Station",
             "timeToStation":125,"platformName":"Eastbound - Platform 1","towards":"Epping"},
            {"lineName":"Central","timeToStation":10,"platformName":"Westbound - Platform 2"}
        ]"#;

        let predictions: Vec<ArrivalPrediction> = serde_json::from_str(json).unwrap();
        let arrivals = convert_arrivals(predictions);

        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].time_to_station, 125);
        assert_eq!(arrivals[1].destination_name, None);
    }

    #[test]
    fn decode_stop_points_payload() {
        let json = r#"{"stopPoints":[
            {"id":"940GZZLUOXC","naptanId":"940GZZLUOXC","commonName":"Oxford Circus Underground Station",
             "modes":["bus","tube"],"stopType":"NaptanMetroStation","lat":51.5,"lon":-0.14}
        ],"pageSize":0,"total":1,"page":0}"#;

        let response: StopPointsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.stop_points.len(), 1);
        assert_eq!(response.total, Some(1));
        assert_eq!(
            response.stop_points[0].stop_type.as_deref(),
            Some("NaptanMetroStation")
        );
    }
}
