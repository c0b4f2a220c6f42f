/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-weather-widget/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// Current conditions endpoint
pub const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// 3-hour interval forecast endpoint
pub const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Direct geocoding endpoint
pub const GEOCODING_PATH: &str = "/geo/1.0/direct";

/// Unit system requested from the weather endpoints
pub const UNITS: &str = "metric";

/// Maximum number of place candidates requested per lookup
pub const SUGGESTION_LIMIT: u8 = 5;

/// Time-of-day that selects the representative forecast entry for a date
pub const MIDDAY: &str = "12:00:00";

/// Condition icon URL template, `{icon}` is replaced by the provider icon id
pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
