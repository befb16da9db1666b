use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{location::IP_API_URL, provider::openweather::DEFAULT_BASE_URL, query::Coordinates};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_LOCATION: &str = "Toronto";

/// Location provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    /// Try to resolve the device location before the first fetch.
    pub enabled: bool,
    pub timeout_secs: u64,
    /// How long a previous fix may be reused.
    pub maximum_age_secs: u64,
    /// Report these coordinates instead of looking the location up.
    pub pinned: Option<Coordinates>,
    /// IP geolocation endpoint. Empty means no lookup service is available.
    pub lookup_url: String,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_secs: 10,
            maximum_age_secs: 600,
            pinned: None,
            lookup_url: IP_API_URL.to_string(),
        }
    }
}

impl LocationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_secs(self.maximum_age_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "Toronto"
///
/// [location]
/// enabled = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Location used when no search has been made and no fix is available.
    pub default_location: String,

    pub base_url: String,

    /// Serve this saved payload instead of calling the API.
    pub fixture: Option<PathBuf>,

    pub location: LocationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_location: DEFAULT_LOCATION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            fixture: None,
            location: LocationSettings::default(),
        }
    }
}

impl Config {
    /// Load config from the platform path, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform path, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}
