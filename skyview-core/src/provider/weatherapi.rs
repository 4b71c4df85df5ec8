use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{QueryError, QueryInput, WeatherSnapshot};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One `current.json` round trip, air quality included.
    #[instrument(skip(self, query), fields(location = %query))]
    pub async fn fetch_weather(&self, query: &QueryInput) -> Result<WeatherSnapshot, QueryError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(QueryError::MissingCredential)?;

        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            // form-encoded: a space in `q` is sent as `+`
            .query(&[("key", api_key), ("q", query.as_str()), ("aqi", "yes")])
            .send()
            .await
            .map_err(|e| {
                QueryError::Transport(format!("Failed to send request to WeatherAPI.com: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            QueryError::Transport(format!("Failed to read WeatherAPI response body: {e}"))
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "WeatherAPI returned an error");
            return Err(QueryError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status.as_u16(), &body),
            });
        }

        let parsed: WeatherSnapshot = serde_json::from_str(&body).map_err(|e| {
            QueryError::Transport(format!("Failed to parse WeatherAPI current JSON: {e}"))
        })?;

        debug!(payload = %body, "WeatherAPI response");
        debug!(
            air_quality = %parsed
                .air_quality_raw()
                .map(|aq| aq.to_string())
                .unwrap_or_else(|| "null".to_string()),
            "WeatherAPI air_quality"
        );

        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

/// Human-readable message for a failed call.
///
/// Prefers the service's own `error.message`, then the raw body, then a
/// generic line naming the status.
pub(crate) fn upstream_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<WaErrorResponse>(body) {
        if !parsed.error.message.is_empty() {
            return parsed.error.message;
        }
    }

    if body.trim().is_empty() {
        format!("Request failed with status {status}")
    } else {
        body.to_string()
    }
}

#[async_trait]
impl WeatherSource for WeatherApiProvider {
    async fn current(&self, query: &QueryInput) -> Result<WeatherSnapshot, QueryError> {
        self.fetch_weather(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
