//! Error types for weather queries and device location

use crate::models::LocationSelector;

/// Device location errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    Unavailable,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("{endpoint} endpoint rejected the request (cod {code}): {message}")]
    Rejected {
        endpoint: &'static str,
        code: String,
        message: String,
    },
}

impl WeatherError {
    /// Notice shown to the user when a query for `selector` fails.
    ///
    /// Every failure kind yields the same notice for a given selector; the
    /// detail stays in the logs.
    #[must_use]
    pub fn user_message(&self, selector: &LocationSelector) -> &'static str {
        match selector {
            LocationSelector::City(_) => "City not found.",
            LocationSelector::Coordinates { .. } => "Could not fetch weather for this location.",
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
