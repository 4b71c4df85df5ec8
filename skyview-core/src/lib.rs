//! Core library for the `skyview` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weatherapi.com client behind the [`WeatherSource`] seam
//! - Condition → background matching and air-quality extraction
//! - The UI state record that gates submissions
//!
//! It is used by `skyview-cli`, but can also be reused by other front ends.

pub mod air_quality;
pub mod background;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod view;

pub use air_quality::{DisplayAirQuality, extract_air_quality};
pub use background::{BACKGROUNDS, DEFAULT_KEY, background_url, select_background_key};
pub use config::Config;
pub use error::QueryError;
pub use model::{AirQuality, QueryInput, WeatherSnapshot};
pub use provider::{WeatherSource, source_from_config, weatherapi::WeatherApiProvider};
pub use session::{Session, UiState};
pub use view::WeatherView;
