use std::path::PathBuf;

use async_trait::async_trait;

use crate::{error::ForecastError, model::Forecast, query::Query};

use super::{WeatherProvider, openweather::parse_forecast};

/// Serves a saved forecast payload from disk, ignoring the query.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WeatherProvider for FixtureProvider {
    async fn forecast(&self, query: &Query) -> Result<Forecast, ForecastError> {
        tracing::debug!(path = %self.path.display(), %query, "loading fixture forecast");

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ForecastError::Fixture {
                path: self.path.display().to_string(),
                source,
            })?;

        parse_forecast(&body)
    }
}
