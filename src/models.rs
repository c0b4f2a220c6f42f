use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

/// Status fields present on every weather/forecast body, success or not.
///
/// `cod` is numeric on the current-weather endpoint and a numeric string on
/// the forecast endpoint, so it is kept as raw JSON.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub cod: serde_json::Value,
    #[serde(default)]
    pub message: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timezone: i64,
    pub sys: SysData,
    pub main: MainData,
    #[serde(default)]
    pub wind: WindData,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
}

#[derive(Debug, Deserialize)]
pub struct SysData {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct MainData {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub pressure: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct WindData {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionData {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt_txt: String,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    pub state: Option<String>,
}

// ============================================================================
// Widget Data Model
// ============================================================================

/// Location a weather query is scoped to
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSelector {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationSelector {
    /// Query parameters selecting this location on the weather endpoints
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.clone())],
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }
}

impl std::fmt::Display for LocationSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => write!(f, "city '{}'", name),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "coordinates {:.4}, {:.4}", latitude, longitude),
        }
    }
}

/// A geocoded match for free-text place search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodingResult> for PlaceCandidate {
    fn from(result: GeocodingResult) -> Self {
        Self {
            name: result.name,
            state: result.state,
            country: result.country,
            latitude: result.lat,
            longitude: result.lon,
        }
    }
}

/// Single-instant weather snapshot for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country_code: String,
    /// Seconds to add to UTC to obtain the location's local time
    pub utc_offset_secs: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub sunrise: i64,
    pub sunset: i64,
}

impl From<CurrentWeatherResponse> for CurrentConditions {
    fn from(response: CurrentWeatherResponse) -> Self {
        let condition = response.weather.into_iter().next();
        let (condition, description, icon) = match condition {
            Some(c) => (c.main, c.description, c.icon),
            None => Default::default(),
        };

        Self {
            city_name: response.name,
            country_code: response.sys.country,
            utc_offset_secs: response.timezone,
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            temp_min: response.main.temp_min,
            temp_max: response.main.temp_max,
            humidity: response.main.humidity,
            pressure: response.main.pressure,
            wind_speed: response.wind.speed,
            condition,
            description,
            icon,
            sunrise: response.sys.sunrise,
            sunset: response.sys.sunset,
        }
    }
}

/// One timestamped reading from the forecast feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    /// Provider local-naive timestamp, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// `YYYY-MM-DD` prefix of the timestamp
    pub date: String,
    pub temperature: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn new(
        timestamp: impl Into<String>,
        temperature: f64,
        condition: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        let date = timestamp.get(..10).unwrap_or(&timestamp).to_string();
        Self {
            timestamp,
            date,
            temperature,
            condition: condition.into(),
            description: String::new(),
            icon: String::new(),
        }
    }

    /// Time-of-day part of the timestamp, if it has one
    pub fn time_of_day(&self) -> Option<&str> {
        self.timestamp.split_once(' ').map(|(_, time)| time)
    }
}

impl From<ForecastItem> for ForecastEntry {
    fn from(item: ForecastItem) -> Self {
        let mut entry = Self::new(item.dt_txt, item.main.temp, String::new());
        if let Some(c) = item.weather.into_iter().next() {
            entry.condition = c.main;
            entry.description = c.description;
            entry.icon = c.icon;
        }
        entry
    }
}

/// Current conditions paired with the daily forecast sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchWeatherRequest {
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SuggestPlacesRequest {
    pub query: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SelectSuggestionRequest {
    /// Zero-based position in the visible suggestion list
    pub index: usize,
}
