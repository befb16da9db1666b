use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::ForecastError,
    model::{City, Condition, Forecast, ForecastSample},
    query::Query,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Live 5-day / 3-hour forecast from OpenWeatherMap.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn forecast(&self, query: &Query) -> Result<Forecast, ForecastError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        tracing::debug!(%url, %query, "requesting forecast");

        let mut params = query.params();
        params.push(("appid", self.api_key.clone()));

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        let forecast = parse_forecast(&body)?;
        tracing::debug!(
            city = %forecast.city,
            samples = forecast.samples.len(),
            "forecast received"
        );
        Ok(forecast)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Option<Vec<OwForecastEntry>>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

/// Decode a forecast payload as returned by the `/forecast` endpoint.
pub fn parse_forecast(body: &str) -> Result<Forecast, ForecastError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;

    let list = parsed.list.ok_or(ForecastError::IncompletePayload("list"))?;
    let city = parsed
        .city
        .filter(|c| !c.name.trim().is_empty())
        .ok_or(ForecastError::IncompletePayload("city"))?;

    let samples = list
        .into_iter()
        .map(into_sample)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Forecast {
        city: City {
            name: city.name,
            country: city.country,
        },
        samples,
    })
}

fn into_sample(entry: OwForecastEntry) -> Result<ForecastSample, ForecastError> {
    let timestamp =
        DateTime::from_timestamp(entry.dt, 0).ok_or(ForecastError::Timestamp(entry.dt))?;

    let condition = entry.weather.into_iter().next().map(|w| Condition {
        category: w.main,
        description: w.description,
        icon: w.icon,
    });

    Ok(ForecastSample {
        timestamp,
        temperature: entry.main.temp,
        feels_like: entry.main.feels_like,
        humidity_pct: entry.main.humidity,
        pressure_hpa: entry.main.pressure,
        wind_speed_mps: entry.wind.speed,
        clouds_pct: entry.clouds.all,
        visibility_m: entry.visibility,
        condition,
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
