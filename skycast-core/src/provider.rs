use crate::{
    Config, Forecast, Query,
    error::ForecastError,
    provider::{fixture::FixtureProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod fixture;
pub mod openweather;

/// Source of forecast payloads for a query.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, query: &Query) -> Result<Forecast, ForecastError>;
}

/// Construct the data source described by `config`.
///
/// A configured fixture wins over the live API.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if let Some(path) = &config.fixture {
        return Ok(Box::new(FixtureProvider::new(path.clone())));
    }

    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skycast configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        &config.base_url,
    )))
}
