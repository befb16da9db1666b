//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The forecast model and the per-day aggregation of 3-hour samples
//! - Temperature display rounding and weather themes
//! - Session state and the controller that sequences location lookup and fetches
//! - Weather data sources (OpenWeatherMap, saved fixtures) and location providers
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod query;
pub mod session;
pub mod theme;
pub mod units;

pub use aggregate::{daily_summaries, daily_summaries_local};
pub use config::{Config, LocationSettings};
pub use controller::SessionController;
pub use error::{ForecastError, LocationError, QueryError};
pub use location::LocationProvider;
pub use model::{City, Condition, DailySummary, Forecast, ForecastSample};
pub use provider::WeatherProvider;
pub use query::{Coordinates, Query};
pub use session::{LoadState, Session, ViewMode};
pub use theme::Theme;
pub use units::{Precision, format_celsius};
