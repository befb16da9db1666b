use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Primary weather condition attached to a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Category such as "Clear" or "Rain".
    pub category: String,
    pub description: String,
    /// Icon code, e.g. "10d".
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("http://openweathermap.org/img/w/{}.png", self.icon)
    }
}

/// One 3-hour forecast observation. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub clouds_pct: u8,
    pub visibility_m: Option<u32>,
    pub condition: Option<Condition>,
}

impl ForecastSample {
    pub fn category(&self) -> Option<&str> {
        self.condition.as_ref().map(|c| c.category.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.country.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}, {}", self.name, self.country)
        }
    }
}

/// A parsed forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    pub samples: Vec<ForecastSample>,
}

impl Forecast {
    /// The earliest sample, shown as "current conditions".
    pub fn current(&self) -> Option<&ForecastSample> {
        self.samples.first()
    }
}

/// Aggregated view of a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub representative: ForecastSample,
    pub daily_min: f64,
    pub daily_max: f64,
}
