use chrono::{DateTime, Utc};

use crate::constants::ICON_URL_TEMPLATE;
use crate::models::{CurrentConditions, ForecastEntry, PlaceCandidate, WeatherReport};
use crate::state::DisplayState;
use crate::theme::theme_for;
use crate::time_format::{format_clock_at, format_event_time, format_forecast_day};

/// Formats the whole dashboard: notice, weather and open suggestions
pub fn format_dashboard(state: &DisplayState, now: DateTime<Utc>) -> String {
    let mut sections = Vec::new();

    if let Some(notice) = &state.notice {
        sections.push(format!("Notice: {}\n", notice));
    }
    if let Some(report) = &state.report {
        sections.push(format_report(report, now));
    }
    let suggestions = state.visible_suggestions();
    if !suggestions.is_empty() {
        sections.push(format_suggestions(suggestions));
    }

    if sections.is_empty() {
        return "No weather loaded. Search for a city to get started.".to_string();
    }
    sections.join("\n")
}

/// Formats current conditions and the daily forecast
pub fn format_report(report: &WeatherReport, now: DateTime<Utc>) -> String {
    let current = &report.current;
    let mut output = format_current(current, now);

    if !report.forecast.is_empty() {
        output.push_str(&format!("\n{}-Day Forecast:\n\n", report.forecast.len()));
        for entry in &report.forecast {
            output.push_str(&format_forecast_card(entry));
        }
    }
    output
}

fn format_current(current: &CurrentConditions, now: DateTime<Utc>) -> String {
    format!(
        "{}, {}\n  Local Time: {}\n  Conditions: {} ({})\n  Icon: {}\n  Temperature: {} \u{00b0}C\n  Temp Range: {}\n  Feels Like: {} \u{00b0}C\n  Humidity: {}%\n  Pressure: {} hPa\n  Wind: {} m/s\n  Sunrise: {}\n  Sunset: {}\n  Background: {}\n",
        current.city_name,
        current.country_code,
        format_clock_at(now, current.utc_offset_secs),
        current.condition,
        current.description,
        icon_url(&current.icon),
        current.temperature,
        format_temp_range(current),
        current.feels_like,
        current.humidity,
        current.pressure,
        current.wind_speed,
        format_event_time(current.sunrise, current.utc_offset_secs),
        format_event_time(current.sunset, current.utc_offset_secs),
        theme_for(&current.condition).css(),
    )
}

fn format_forecast_card(entry: &ForecastEntry) -> String {
    let day = format_forecast_day(&entry.timestamp).unwrap_or_else(|| entry.date.clone());
    format!(
        "{}:\n  Temperature: {}\u{00b0}C\n  Conditions: {}\n  Icon: {}\n\n",
        day,
        entry.temperature,
        entry.condition,
        icon_url(&entry.icon)
    )
}

/// Min/max range, or "Not available" when the provider reports a single value
pub fn format_temp_range(current: &CurrentConditions) -> String {
    if current.temp_min == current.temp_max {
        "Not available".to_string()
    } else {
        format!(
            "{}\u{00b0}C - {}\u{00b0}C",
            current.temp_min, current.temp_max
        )
    }
}

/// Formats the suggestion list, headed by the current-location option
pub fn format_suggestions(suggestions: &[PlaceCandidate]) -> String {
    let mut output =
        String::from("Suggestions:\n  - Use My Current Location (use_current_location)\n");
    for (i, place) in suggestions.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i, place_label(place)));
    }
    output
}

/// "Name, State, Country", skipping the state when absent
pub fn place_label(place: &PlaceCandidate) -> String {
    match place.state.as_deref().filter(|s| !s.is_empty()) {
        Some(state) => format!("{}, {}, {}", place.name, state, place.country),
        None => format!("{}, {}", place.name, place.country),
    }
}

pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Event;

    // 2024-01-01T00:00:00Z
    const NEW_YEAR_UTC: i64 = 1_704_067_200;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            city_name: "Reykjavik".to_string(),
            country_code: "IS".to_string(),
            utc_offset_secs: 0,
            temperature: -2.5,
            feels_like: -7.0,
            temp_min: -3.0,
            temp_max: -1.0,
            humidity: 86,
            pressure: 998,
            wind_speed: 9.3,
            condition: "Snow".to_string(),
            description: "light snow".to_string(),
            icon: "13d".to_string(),
            sunrise: NEW_YEAR_UTC + 11 * 3600 + 19 * 60,
            sunset: NEW_YEAR_UTC + 15 * 3600 + 44 * 60,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NEW_YEAR_UTC + 9 * 3600, 0).unwrap()
    }

    #[test]
    fn test_place_label() {
        let mut place = PlaceCandidate {
            name: "Portland".to_string(),
            state: Some("Oregon".to_string()),
            country: "US".to_string(),
            latitude: 45.5,
            longitude: -122.7,
        };
        assert_eq!(place_label(&place), "Portland, Oregon, US");
        place.state = None;
        assert_eq!(place_label(&place), "Portland, US");
    }

    #[test]
    fn test_temp_range() {
        let mut current = conditions();
        assert_eq!(format_temp_range(&current), "-3\u{00b0}C - -1\u{00b0}C");
        current.temp_max = current.temp_min;
        assert_eq!(format_temp_range(&current), "Not available");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn test_report_contents() {
        let report = WeatherReport {
            current: conditions(),
            forecast: vec![ForecastEntry::new("2024-01-02 12:00:00", -1.5, "Snow")],
        };
        let text = format_report(&report, now());

        assert!(text.starts_with("Reykjavik, IS\n"));
        assert!(text.contains("Local Time: 09:00 AM"));
        assert!(text.contains("Sunrise: 11:19 AM"));
        assert!(text.contains("Sunset: 03:44 PM"));
        assert!(text.contains("Background: linear-gradient(to bottom, #e6dada, #274046)"));
        assert!(text.contains("1-Day Forecast"));
        assert!(text.contains("Tue, Jan 2:"));
    }

    #[test]
    fn test_empty_dashboard() {
        let text = format_dashboard(&DisplayState::default(), now());
        assert!(text.starts_with("No weather loaded"));
    }

    #[test]
    fn test_dashboard_with_notice_and_suggestions() {
        let mut state = DisplayState::default();
        state.apply(Event::QueryFailed {
            notice: "City not found.".to_string(),
        });
        state.apply(Event::SuggestionsUpdated(vec![PlaceCandidate {
            name: "Springfield".to_string(),
            state: Some("Illinois".to_string()),
            country: "US".to_string(),
            latitude: 39.8,
            longitude: -89.6,
        }]));

        let text = format_dashboard(&state, now());
        assert!(text.contains("Notice: City not found."));
        assert!(text.contains("Use My Current Location"));
        assert!(text.contains("0. Springfield, Illinois, US"));
    }
}
