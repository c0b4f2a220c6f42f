//! OpenWeatherMap client: paired current/forecast queries and place suggestions.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{
    CURRENT_WEATHER_PATH, FORECAST_PATH, GEOCODING_PATH, SUGGESTION_LIMIT, UNITS, USER_AGENT,
};
use crate::error::WeatherError;
use crate::models::{
    CurrentConditions, CurrentWeatherResponse, ForecastEntry, ForecastResponse, GeocodingResult,
    LocationSelector, PlaceCandidate, StatusEnvelope, WeatherReport,
};
use crate::sampler::sample_daily;

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

/// Anything that can answer weather queries and place searches.
pub trait WeatherSource: Send + Sync {
    /// Fetches current conditions and the daily forecast for one location.
    fn query(
        &self,
        selector: &LocationSelector,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send;

    /// Ranked place candidates for a partial name. Failures yield an empty list.
    fn suggest(&self, query: &str) -> impl Future<Output = Vec<PlaceCandidate>> + Send;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    api_base: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Weather for a city name. An empty name is a no-op that issues no request.
    pub async fn query_by_name(&self, city: &str) -> Result<Option<WeatherReport>, WeatherError> {
        if city.is_empty() {
            return Ok(None);
        }
        self.fetch_report(&LocationSelector::City(city.to_string()))
            .await
            .map(Some)
    }

    /// Weather for a coordinate pair. The resolved place name is
    /// `report.current.city_name`.
    pub async fn query_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, WeatherError> {
        self.fetch_report(&LocationSelector::Coordinates {
            latitude,
            longitude,
        })
        .await
    }

    /// Up to five place candidates in provider order. Blank queries issue no
    /// request; any failure is logged and yields an empty list.
    pub async fn suggest_places(&self, query: &str) -> Vec<PlaceCandidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch_places(query).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("Suggestion lookup failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_report(
        &self,
        selector: &LocationSelector,
    ) -> Result<WeatherReport, WeatherError> {
        tracing::info!("Fetching weather for {}", selector);

        let params = selector.query_pairs();
        let (current, forecast) = tokio::join!(
            self.fetch_current(&params),
            self.fetch_forecast(&params)
        );
        let current = current?;
        let forecast = forecast?;

        Ok(WeatherReport {
            current,
            forecast: sample_daily(&forecast),
        })
    }

    async fn fetch_current(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<CurrentConditions, WeatherError> {
        let body = self.get_json(CURRENT_WEATHER_PATH, params, true).await?;
        let envelope = StatusEnvelope::deserialize(&body)?;
        if envelope.cod.as_i64() != Some(200) {
            return Err(rejected(CURRENT_ENDPOINT, &envelope));
        }

        let response: CurrentWeatherResponse = serde_json::from_value(body)?;
        Ok(response.into())
    }

    async fn fetch_forecast(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        let body = self.get_json(FORECAST_PATH, params, true).await?;
        let envelope = StatusEnvelope::deserialize(&body)?;
        if envelope.cod.as_str() != Some("200") {
            return Err(rejected(FORECAST_ENDPOINT, &envelope));
        }

        let response: ForecastResponse = serde_json::from_value(body)?;
        Ok(response.list.into_iter().map(ForecastEntry::from).collect())
    }

    async fn fetch_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, WeatherError> {
        let params = [
            ("q", query.to_string()),
            ("limit", SUGGESTION_LIMIT.to_string()),
        ];
        let body = self.get_json(GEOCODING_PATH, &params, false).await?;
        let results: Vec<GeocodingResult> = serde_json::from_value(body)?;

        Ok(results
            .into_iter()
            .take(SUGGESTION_LIMIT as usize)
            .map(PlaceCandidate::from)
            .collect())
    }

    /// GETs `path` and decodes the body as JSON whatever the HTTP status,
    /// since the provider reports failures in the body.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        metric: bool,
    ) -> Result<Value, WeatherError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())]);
        if metric {
            request = request.query(&[("units", UNITS)]);
        }

        let response = request.send().await?;
        tracing::debug!("GET {} returned status {}", path, response.status());

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl WeatherSource for OpenWeatherClient {
    async fn query(&self, selector: &LocationSelector) -> Result<WeatherReport, WeatherError> {
        self.fetch_report(selector).await
    }

    async fn suggest(&self, query: &str) -> Vec<PlaceCandidate> {
        self.suggest_places(query).await
    }
}

fn rejected(endpoint: &'static str, envelope: &StatusEnvelope) -> WeatherError {
    WeatherError::Rejected {
        endpoint,
        code: json_text(&envelope.cod),
        message: json_text(&envelope.message),
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => "missing".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
