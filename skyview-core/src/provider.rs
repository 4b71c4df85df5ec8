use crate::{
    Config, QueryError, QueryInput, WeatherSnapshot, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Something that can answer "what is the weather at this location right now".
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &QueryInput) -> Result<WeatherSnapshot, QueryError>;
}

/// Build the weatherapi.com source described by `config`.
///
/// A missing API key is not an error here; it surfaces as
/// [`QueryError::MissingCredential`] on the first lookup.
pub fn source_from_config(config: &Config) -> Box<dyn WeatherSource> {
    let provider = WeatherApiProvider::new(config.api_key().map(str::to_owned))
        .with_base_url(config.base_url());
    Box::new(provider)
}
