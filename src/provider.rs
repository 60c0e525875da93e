//! Outbound fetch of current weather from OpenWeather.
//!
//! One request per call: no retry, no caching, reqwest's default timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::storage::WeatherReading;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(StatusCode),
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

/// Anything that can produce a reading for a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherReading, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherReading, ProviderError> {
        let mut query = vec![("lat", lat.to_string()), ("lon", lon.to_string())];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.clone()));
        }

        tracing::debug!(endpoint = %self.endpoint, lat, lon, "fetching current weather");
        let res = self.http.get(&self.endpoint).query(&query).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
