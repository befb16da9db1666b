use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Range-checked latitude/longitude. Deserialization runs the same check as
/// [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = QueryError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.lat, raw.lon)
    }
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, QueryError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(QueryError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(QueryError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// What to fetch a forecast for. Only one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    /// Build a city query, trimming whitespace.
    pub fn city(name: &str) -> Result<Self, QueryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueryError::EmptyCity);
        }
        Ok(Query::City(name.to_string()))
    }

    /// Query-string pairs identifying the location for the forecast endpoint.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::City(name) => vec![("q", name.clone())],
            Query::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(c) => write!(f, "({c})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_is_trimmed() {
        assert_eq!(Query::city("  Toronto ").unwrap(), Query::City("Toronto".into()));
    }

    #[test]
    fn blank_city_is_rejected() {
        assert_eq!(Query::city("   ").unwrap_err(), QueryError::EmptyCity);
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(Coordinates::new(43.65, -79.38).is_ok());
        assert_eq!(Coordinates::new(91.0, 0.0).unwrap_err(), QueryError::Latitude(91.0));
        assert_eq!(Coordinates::new(0.0, -181.0).unwrap_err(), QueryError::Longitude(-181.0));
    }

    #[test]
    fn deserialize_applies_range_check() {
        let ok: Coordinates = serde_json::from_str(r#"{"lat": 45.5, "lon": -73.6}"#).unwrap();
        assert_eq!(ok, Coordinates { lat: 45.5, lon: -73.6 });

        let err = serde_json::from_str::<Coordinates>(r#"{"lat": 999.0, "lon": 0.0}"#).unwrap_err();
        assert!(err.to_string().contains("Latitude 999 is outside"));
    }

    #[test]
    fn params_match_query_variant() {
        let q = Query::City("Paris".into());
        assert_eq!(q.params(), vec![("q", "Paris".to_string())]);

        let c = Query::Coordinates(Coordinates::new(48.5, 2.25).unwrap());
        assert_eq!(
            c.params(),
            vec![("lat", "48.5".to_string()), ("lon", "2.25".to_string())]
        );
    }
}
