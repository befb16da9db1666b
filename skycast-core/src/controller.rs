//! Drives a [`Session`] against a data source and an optional location provider.

use crate::{
    error::QueryError,
    location::LocationProvider,
    provider::WeatherProvider,
    session::Session,
};

#[derive(Debug)]
pub struct SessionController {
    provider: Box<dyn WeatherProvider>,
    locator: Option<Box<dyn LocationProvider>>,
}

impl SessionController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        locator: Option<Box<dyn LocationProvider>>,
    ) -> Self {
        Self { provider, locator }
    }

    /// Initial load. The location lookup, when configured, completes (either
    /// way) before the first fetch is issued.
    pub async fn start(&self, session: &mut Session) {
        if let Some(locator) = &self.locator {
            let result = locator.locate().await;
            session.location_resolved(result);
        }
        self.refresh(session).await;
    }

    /// Manual search. Invalid input leaves the session untouched.
    pub async fn search(&self, session: &mut Session, name: &str) -> Result<(), QueryError> {
        session.submit_search(name)?;
        self.refresh(session).await;
        Ok(())
    }

    /// Fetch the forecast for the session's current query.
    pub async fn refresh(&self, session: &mut Session) {
        let ticket = session.begin_fetch();
        let result = self.provider.forecast(&ticket.query).await;
        session.finish_fetch(&ticket, result);
    }
}
