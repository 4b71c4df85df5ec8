use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    WeatherSnapshot,
    air_quality::{DisplayAirQuality, NOT_AVAILABLE, extract_air_quality},
    background::{background_url, known_keys, select_background_key},
};

/// Everything the surface needs to draw a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub headline: String,
    pub condition: String,
    pub icon_url: Option<String>,
    pub temperature: String,
    pub feels_like: Option<String>,
    pub humidity: String,
    pub wind: Option<String>,
    pub background_key: &'static str,
    pub background_url: &'static str,
    pub air_quality: DisplayAirQuality,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherView {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let background_key = select_background_key(snapshot.condition_text(), &known_keys());

        let headline = format!(
            "{}, {}",
            snapshot.location_name().unwrap_or(NOT_AVAILABLE),
            snapshot.location_country().unwrap_or(NOT_AVAILABLE),
        );

        Self {
            headline,
            condition: snapshot.condition_text().unwrap_or(NOT_AVAILABLE).to_string(),
            icon_url: snapshot.condition_icon().map(normalize_icon_url),
            temperature: snapshot
                .temperature_c()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |t| format!("{t}°C")),
            feels_like: snapshot.feels_like_c().map(|t| format!("{t}°C")),
            humidity: snapshot
                .humidity_pct()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |h| format!("{h}%")),
            wind: snapshot.wind_kph().map(|w| format!("{w} km/h")),
            background_key,
            background_url: background_url(background_key),
            air_quality: extract_air_quality(snapshot),
            observed_at: snapshot.observation_time(),
        }
    }
}

/// The service hands out protocol-relative icon paths (`//cdn...`).
fn normalize_icon_url(icon: &str) -> String {
    if icon.starts_with("//") { format!("https:{icon}") } else { icon.to_string() }
}
