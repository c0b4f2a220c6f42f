//! Weather lookup widget over OpenWeatherMap
//!
//! Searches by city name or coordinates, suggests places while typing, and
//! reduces the 3-hour forecast feed to one midday reading per day. The
//! widget is served over MCP; the display state lives in [`controller`].

pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod location;
pub mod models;
pub mod sampler;
pub mod service;
pub mod state;
pub mod theme;
pub mod time_format;

pub use client::{OpenWeatherClient, WeatherSource};
pub use config::Config;
pub use controller::{QueryOutcome, WeatherController};
pub use error::{LocationError, WeatherError};
pub use service::WeatherWidget;
