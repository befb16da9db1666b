//! Session state owned by the presentation layer.
//!
//! Holds the active query, the view mode and the forecast lifecycle. Fetches
//! are tagged with a generation; a completion for an older generation is
//! dropped so a slow response never overwrites a newer query's result.

use chrono::TimeZone;

use crate::{
    aggregate,
    error::{ForecastError, LocationError, QueryError},
    model::{DailySummary, Forecast, ForecastSample},
    query::{Coordinates, Query},
    theme::Theme,
};

/// Lifecycle of an asynchronously loaded value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Current,
    Forecast,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: Query,
}

#[derive(Debug, Clone)]
pub struct Session {
    query: Query,
    last_location: String,
    view_mode: ViewMode,
    forecast: LoadState<Forecast>,
    /// Last successful forecast, kept visible while reloading or after a failure.
    previous: Option<Forecast>,
    generation: u64,
    diagnostic: Option<String>,
}

impl Session {
    pub fn new(default_location: &str) -> Result<Self, QueryError> {
        let query = Query::city(default_location)?;
        Ok(Self {
            last_location: query.to_string(),
            query,
            view_mode: ViewMode::default(),
            forecast: LoadState::Idle,
            previous: None,
            generation: 0,
            diagnostic: None,
        })
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The most recent location name, used when coordinates are unavailable.
    pub fn last_location(&self) -> &str {
        &self.last_location
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn forecast(&self) -> &LoadState<Forecast> {
        &self.forecast
    }

    /// User-facing message from the last non-fatal problem, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Replace the query with a manual search. Any coordinate query is dropped.
    pub fn submit_search(&mut self, name: &str) -> Result<(), QueryError> {
        let query = Query::city(name)?;
        self.last_location = query.to_string();
        self.query = query;
        tracing::info!(query = %self.query, "search submitted");
        Ok(())
    }

    pub fn use_coordinates(&mut self, coords: Coordinates) {
        self.query = Query::Coordinates(coords);
        tracing::info!(query = %self.query, "using coordinates");
    }

    /// Apply the outcome of a location lookup. Failure falls back to the last
    /// location name and is kept as a diagnostic.
    pub fn location_resolved(&mut self, result: Result<Coordinates, LocationError>) {
        match result {
            Ok(coords) => self.use_coordinates(coords),
            Err(err) => {
                tracing::warn!(fallback = %self.last_location, "location lookup failed: {err}");
                self.diagnostic = Some(err.to_string());
                self.query = Query::City(self.last_location.clone());
            }
        }
    }

    /// Start a fetch for the current query.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let prior = std::mem::replace(&mut self.forecast, LoadState::Loading);
        if let LoadState::Ready(forecast) = prior {
            self.previous = Some(forecast);
        }

        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Record a fetch result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Forecast, ForecastError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale forecast"
            );
            return false;
        }

        match result {
            Ok(forecast) => {
                tracing::info!(city = %forecast.city, "forecast loaded");
                self.previous = None;
                self.forecast = LoadState::Ready(forecast);
            }
            Err(err) => {
                tracing::warn!(query = %ticket.query, "forecast fetch failed: {err}");
                self.forecast = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    /// The forecast to display: the loaded one, or the last good one while
    /// reloading or after a failure.
    pub fn displayed(&self) -> Option<&Forecast> {
        self.forecast.data().or(self.previous.as_ref())
    }

    pub fn current_sample(&self) -> Option<&ForecastSample> {
        self.displayed().and_then(Forecast::current)
    }

    pub fn daily_summaries_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DailySummary> {
        self.displayed()
            .map(|f| aggregate::daily_summaries(&f.samples, tz))
            .unwrap_or_default()
    }

    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        self.displayed()
            .map(|f| aggregate::daily_summaries_local(&f.samples))
            .unwrap_or_default()
    }

    /// Theme for the active view: the current sample's category, or the first
    /// forecast day's.
    pub fn theme_in<Tz: TimeZone>(&self, tz: &Tz) -> Theme {
        let category = match self.view_mode {
            ViewMode::Current => self
                .current_sample()
                .and_then(ForecastSample::category)
                .map(str::to_owned),
            ViewMode::Forecast => self
                .daily_summaries_in(tz)
                .first()
                .and_then(|d| d.representative.category())
                .map(str::to_owned),
        };
        Theme::for_category(category.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, Condition};
    use chrono::{DateTime, Utc};

    fn sample(ts: i64, category: &str) -> ForecastSample {
        ForecastSample {
            timestamp: DateTime::from_timestamp(ts, 0).unwrap(),
            temperature: 280.0,
            feels_like: 279.0,
            humidity_pct: 70,
            pressure_hpa: 1000.0,
            wind_speed_mps: 2.0,
            clouds_pct: 90,
            visibility_m: None,
            condition: Some(Condition {
                category: category.into(),
                description: category.to_lowercase(),
                icon: "01d".into(),
            }),
        }
    }

    fn forecast(city: &str, samples: Vec<ForecastSample>) -> Forecast {
        Forecast {
            city: City {
                name: city.into(),
                country: "CA".into(),
            },
            samples,
        }
    }

    #[test]
    fn new_session_is_idle_with_city_query() {
        let session = Session::new("Toronto").unwrap();
        assert_eq!(session.query(), &Query::City("Toronto".into()));
        assert_eq!(session.forecast(), &LoadState::Idle);
        assert!(session.displayed().is_none());
        assert!(session.daily_summaries().is_empty());
    }

    #[test]
    fn search_replaces_coordinate_query() {
        let mut session = Session::new("Toronto").unwrap();
        session.use_coordinates(Coordinates { lat: 1.0, lon: 2.0 });

        session.submit_search("Ottawa").unwrap();

        assert_eq!(session.query(), &Query::City("Ottawa".into()));
        assert_eq!(session.last_location(), "Ottawa");
    }

    #[test]
    fn blank_search_keeps_previous_query() {
        let mut session = Session::new("Toronto").unwrap();
        assert!(session.submit_search("  ").is_err());
        assert_eq!(session.query(), &Query::City("Toronto".into()));
    }

    #[test]
    fn location_failure_falls_back_to_last_location() {
        let mut session = Session::new("Toronto").unwrap();
        session.submit_search("Montreal").unwrap();

        session.location_resolved(Err(LocationError::Timeout));

        assert_eq!(session.query(), &Query::City("Montreal".into()));
        assert_eq!(session.diagnostic(), Some("Location request timed out"));
    }

    #[test]
    fn location_success_switches_to_coordinates() {
        let mut session = Session::new("Toronto").unwrap();
        let coords = Coordinates { lat: 45.5, lon: -73.6 };

        session.location_resolved(Ok(coords));

        assert_eq!(session.query(), &Query::Coordinates(coords));
        assert!(session.diagnostic().is_none());
    }

    #[test]
    fn fetch_lifecycle_reaches_ready() {
        let mut session = Session::new("Toronto").unwrap();

        let ticket = session.begin_fetch();
        assert!(session.forecast().is_loading());
        assert_eq!(ticket.query, Query::City("Toronto".into()));

        assert!(session.finish_fetch(&ticket, Ok(forecast("Toronto", vec![sample(0, "Clear")]))));
        assert_eq!(session.displayed().unwrap().city.name, "Toronto");
    }

    #[test]
    fn failure_is_explicit_and_keeps_previous_result() {
        let mut session = Session::new("Toronto").unwrap();
        let first = session.begin_fetch();
        session.finish_fetch(&first, Ok(forecast("Toronto", vec![sample(0, "Clear")])));

        let second = session.begin_fetch();
        assert_eq!(session.displayed().unwrap().city.name, "Toronto");
        session.finish_fetch(&second, Err(ForecastError::IncompletePayload("list")));

        assert_eq!(
            session.forecast().error(),
            Some("Forecast payload is missing `list`")
        );
        assert_eq!(session.displayed().unwrap().city.name, "Toronto");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut session = Session::new("Toronto").unwrap();
        let old = session.begin_fetch();
        session.submit_search("Vancouver").unwrap();
        let new = session.begin_fetch();

        assert!(session.finish_fetch(&new, Ok(forecast("Vancouver", vec![]))));
        assert!(!session.finish_fetch(&old, Ok(forecast("Toronto", vec![]))));

        assert_eq!(session.displayed().unwrap().city.name, "Vancouver");
    }

    #[test]
    fn theme_follows_view_mode() {
        let mut session = Session::new("Toronto").unwrap();
        let ticket = session.begin_fetch();
        // Second sample sits at 12:00 UTC, the first at 00:00 UTC the same day.
        let samples = vec![sample(1_717_200_000, "Snow"), sample(1_717_243_200, "Rain")];
        session.finish_fetch(&ticket, Ok(forecast("Toronto", samples)));

        assert_eq!(session.theme_in(&Utc), Theme::Snowy);

        session.set_view_mode(ViewMode::Forecast);
        assert_eq!(session.theme_in(&Utc), Theme::Rainy);
    }
}
