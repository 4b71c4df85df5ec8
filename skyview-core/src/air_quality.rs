//! Summary fields pulled out of the optional `air_quality` object.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Value;

use crate::model::{WeatherSnapshot, coerce_number};

/// Shown for any field that is missing or unusable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Diagnostic text used when the response carried no air-quality object.
pub const NO_DATA: &str = "No data";

/// Regional index keys, most preferred first.
pub const INDEX_KEYS: &[&str] = &["us-epa-index", "gb-defra-index"];

/// What the surface shows for air quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayAirQuality {
    pub index: Option<String>,
    pub pm2_5: Option<String>,
    pub pm10: Option<String>,
    /// Whether the response carried an `air_quality` value at all.
    pub present: bool,
    /// Keys of the raw object, in response order.
    pub keys: Vec<String>,
    /// The raw value pretty-printed, or [`NO_DATA`].
    pub raw: String,
}

impl DisplayAirQuality {
    fn unavailable() -> Self {
        Self {
            index: None,
            pm2_5: None,
            pm10: None,
            present: false,
            keys: Vec::new(),
            raw: NO_DATA.to_string(),
        }
    }

    pub fn index_or_placeholder(&self) -> &str {
        self.index.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn pm2_5_or_placeholder(&self) -> &str {
        self.pm2_5.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn pm10_or_placeholder(&self) -> &str {
        self.pm10.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

pub fn extract_air_quality(snapshot: &WeatherSnapshot) -> DisplayAirQuality {
    let Some(raw_value) = snapshot.air_quality_raw() else {
        return DisplayAirQuality::unavailable();
    };
    let raw = serde_json::to_string_pretty(raw_value).unwrap_or_else(|_| raw_value.to_string());

    // Anything but an object is shown for diagnostics only.
    let Some(aq) = raw_value.as_object() else {
        return DisplayAirQuality { present: true, raw, ..DisplayAirQuality::unavailable() };
    };

    let index = INDEX_KEYS
        .iter()
        .filter_map(|key| aq.get(*key))
        .find(|value| !value.is_null())
        .map(display_value);

    DisplayAirQuality {
        index,
        pm2_5: aq.get("pm2_5").and_then(coerce_number).map(two_decimals),
        pm10: aq.get("pm10").and_then(coerce_number).map(two_decimals),
        present: true,
        keys: aq.keys().cloned().collect(),
        raw,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Two decimals, ties rounded away from zero on the exact binary value.
fn two_decimals(n: f64) -> String {
    match Decimal::from_f64_retain(n) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        None => format!("{n:.2}"),
    }
}
