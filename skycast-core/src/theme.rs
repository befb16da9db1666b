//! Background theme derived from a weather category.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    #[default]
    Default,
}

/// A non-empty category with no theme of its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weather condition: {0}")]
pub struct UnknownCategory(pub String);

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Default => "default",
        }
    }

    /// Strict lookup. An absent or empty category is `Default`, an
    /// unrecognized one is an error.
    pub fn lookup(category: Option<&str>) -> Result<Theme, UnknownCategory> {
        let Some(category) = category.filter(|c| !c.is_empty()) else {
            return Ok(Theme::Default);
        };

        match category.to_lowercase().as_str() {
            "clear" => Ok(Theme::Sunny),
            "clouds" => Ok(Theme::Cloudy),
            "rain" | "drizzle" | "thunderstorm" => Ok(Theme::Rainy),
            "snow" => Ok(Theme::Snowy),
            _ => Err(UnknownCategory(category.to_string())),
        }
    }

    /// Lenient lookup: unknown categories are logged and fall back to `Default`.
    pub fn for_category(category: Option<&str>) -> Theme {
        Theme::lookup(category).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            Theme::Default
        })
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
