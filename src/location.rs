//! Device location capability.

use std::future::Future;

use crate::config::Config;
use crate::error::LocationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One-shot source of the device's coordinates.
pub trait Geolocator: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Position, LocationError>> + Send;
}

/// Reports the coordinates configured for this host, if any.
#[derive(Debug, Clone, Default)]
pub struct DeviceLocation {
    position: Option<Position>,
}

impl DeviceLocation {
    pub fn new(position: Option<Position>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config
                .device_location
                .map(|(latitude, longitude)| Position {
                    latitude,
                    longitude,
                }),
        )
    }
}

impl Geolocator for DeviceLocation {
    async fn current_position(&self) -> Result<Position, LocationError> {
        self.position.ok_or(LocationError::Unavailable)
    }
}
