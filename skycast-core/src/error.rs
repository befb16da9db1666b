use thiserror::Error;

/// Errors produced while obtaining or decoding a forecast payload.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse forecast JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload parsed but lacks `list` or `city`.
    #[error("Forecast payload is missing `{0}`")]
    IncompletePayload(&'static str),

    #[error("Invalid sample timestamp: {0}")]
    Timestamp(i64),

    #[error("Failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Location provider failures. None of these are fatal to a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location request timed out")]
    Timeout,
    #[error("Location is not supported on this device")]
    Unsupported,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Location name must not be empty")]
    EmptyCity,
    #[error("Latitude {0} is outside -90..=90")]
    Latitude(f64),
    #[error("Longitude {0} is outside -180..=180")]
    Longitude(f64),
}
