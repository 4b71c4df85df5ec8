use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryError;

/// A location string that is known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput(String);

impl QueryInput {
    /// Trim `raw` and reject it if nothing is left.
    pub fn new(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw `air_quality` object as sent by the service.
pub type AirQuality = Map<String, Value>;

/// Parsed body of a successful `current.json` call.
///
/// Every level is optional so that a partial payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub current: Option<Current>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Current {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub feelslike_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub condition: Option<Condition>,
    /// Kept as whatever JSON arrived; only an object is read as air quality.
    #[serde(default)]
    pub air_quality: Option<Value>,
    #[serde(default)]
    pub last_updated_epoch: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl WeatherSnapshot {
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref()?.name.as_deref()
    }

    pub fn location_country(&self) -> Option<&str> {
        self.location.as_ref()?.country.as_deref()
    }

    fn condition(&self) -> Option<&Condition> {
        self.current.as_ref()?.condition.as_ref()
    }

    pub fn condition_text(&self) -> Option<&str> {
        self.condition()?.text.as_deref()
    }

    pub fn condition_icon(&self) -> Option<&str> {
        self.condition()?.icon.as_deref()
    }

    pub fn condition_code(&self) -> Option<i64> {
        self.condition()?.code
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.current.as_ref()?.temp_c
    }

    pub fn feels_like_c(&self) -> Option<f64> {
        self.current.as_ref()?.feelslike_c
    }

    pub fn humidity_pct(&self) -> Option<f64> {
        self.current.as_ref()?.humidity
    }

    pub fn wind_kph(&self) -> Option<f64> {
        self.current.as_ref()?.wind_kph
    }

    /// The `air_quality` object, if the service sent one.
    pub fn air_quality(&self) -> Option<&AirQuality> {
        self.air_quality_raw()?.as_object()
    }

    /// The `air_quality` value as received, whatever its shape.
    pub fn air_quality_raw(&self) -> Option<&Value> {
        self.current.as_ref()?.air_quality.as_ref().filter(|v| !v.is_null())
    }

    pub fn observation_time(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref()?.last_updated_epoch.and_then(unix_to_utc)
    }
}

/// Numbers pass through, numeric strings are parsed, everything else is
/// absent. Non-finite results are absent too.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
