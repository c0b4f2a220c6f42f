//! Environment-driven configuration

use anyhow::{Context, Result};
use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT_SECS, OPENWEATHER_API_BASE};

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const API_BASE_VAR: &str = "OPENWEATHER_API_BASE";
pub const TIMEOUT_VAR: &str = "WEATHER_HTTP_TIMEOUT_SECS";
pub const DEVICE_LATITUDE_VAR: &str = "WEATHER_DEVICE_LATITUDE";
pub const DEVICE_LONGITUDE_VAR: &str = "WEATHER_DEVICE_LONGITUDE";

#[derive(Clone)]
pub struct Config {
    /// OpenWeatherMap API key; empty means every request is rejected upstream
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
    /// Coordinates reported by the device-location capability
    pub device_location: Option<(f64, f64)>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("device_location", &self.device_location)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: OPENWEATHER_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            device_location: None,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!(
                "{} is not set; OpenWeatherMap will reject every request",
                API_KEY_VAR
            );
        }

        let api_base = get(API_BASE_VAR)
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| OPENWEATHER_API_BASE.to_string());

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_VAR, raw
                )
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let device_location = match (get(DEVICE_LATITUDE_VAR), get(DEVICE_LONGITUDE_VAR)) {
            (Some(lat), Some(lon)) => Some((
                parse_coordinate(DEVICE_LATITUDE_VAR, &lat, 90.0)?,
                parse_coordinate(DEVICE_LONGITUDE_VAR, &lon, 180.0)?,
            )),
            (None, None) => None,
            _ => anyhow::bail!(
                "{} and {} must be set together",
                DEVICE_LATITUDE_VAR,
                DEVICE_LONGITUDE_VAR
            ),
        };

        Ok(Self {
            api_key,
            api_base,
            timeout: Duration::from_secs(timeout_secs),
            device_location,
        })
    }
}

fn parse_coordinate(var: &str, raw: &str, limit: f64) -> Result<f64> {
    let value = raw
        .parse::<f64>()
        .with_context(|| format!("{} must be a number, got '{}'", var, raw))?;
    if !(-limit..=limit).contains(&value) {
        anyhow::bail!("{} must be within ±{}, got {}", var, limit, value);
    }
    Ok(value)
}
