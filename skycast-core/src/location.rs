//! Device location providers.
//!
//! A terminal has no browser geolocation, so the live provider asks an IP
//! geolocation service. Every provider may fail; callers fall back to a
//! location name.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::{sync::Mutex, time::Instant};

use crate::{config::LocationSettings, error::LocationError, query::Coordinates};

pub const IP_API_URL: &str = "http://ip-api.com/json";

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same coordinates.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Stands in when no lookup service can be reached from this device.
#[derive(Debug, Clone, Copy)]
pub struct Unsupported;

#[async_trait]
impl LocationProvider for Unsupported {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Approximate location from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocation {
    url: String,
    http: Client,
}

impl IpLocation {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or(body.status);
            return Err(LocationError::Unavailable(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => {
                Coordinates::new(lat, lon).map_err(|e| LocationError::Unavailable(e.to_string()))
            }
            _ => Err(LocationError::Unavailable("response had no coordinates".into())),
        }
    }
}

/// Bounds each attempt with a timeout and reuses a recent fix.
#[derive(Debug)]
pub struct CachedLocation<P> {
    inner: P,
    timeout: Duration,
    maximum_age: Duration,
    last_fix: Mutex<Option<(Instant, Coordinates)>>,
}

impl<P: LocationProvider> CachedLocation<P> {
    pub fn new(inner: P, settings: &LocationSettings) -> Self {
        Self {
            inner,
            timeout: settings.timeout(),
            maximum_age: settings.maximum_age(),
            last_fix: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P: LocationProvider> LocationProvider for CachedLocation<P> {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let mut last_fix = self.last_fix.lock().await;

        if let Some((at, coords)) = *last_fix {
            if at.elapsed() <= self.maximum_age {
                tracing::debug!(%coords, "reusing cached location");
                return Ok(coords);
            }
        }

        let coords = tokio::time::timeout(self.timeout, self.inner.locate())
            .await
            .map_err(|_| LocationError::Timeout)??;

        *last_fix = Some((Instant::now(), coords));
        Ok(coords)
    }
}

/// Build the provider chain for `settings`, or `None` when location is off.
pub fn provider_from_settings(settings: &LocationSettings) -> Option<Box<dyn LocationProvider>> {
    if !settings.enabled {
        return None;
    }

    let provider: Box<dyn LocationProvider> = match (settings.pinned, settings.lookup_url.trim()) {
        (Some(coords), _) => Box::new(CachedLocation::new(FixedLocation(coords), settings)),
        (None, "") => {
            tracing::debug!("no location lookup service configured");
            Box::new(Unsupported)
        }
        (None, url) => Box::new(CachedLocation::new(IpLocation::with_url(url), settings)),
    };
    Some(provider)
}
