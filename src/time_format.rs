//! Clock and date labels for provider timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Shown in place of a clock reading that cannot be represented
pub const INVALID_TIME: &str = "Invalid Date";

const CLOCK_FORMAT: &str = "%I:%M %p";
const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FORECAST_DAY_FORMAT: &str = "%a, %b %-d";

/// Formats a provider event time (sunrise, sunset) as the location's local
/// 12-hour clock, e.g. `"06:42 AM"`.
pub fn format_event_time(epoch_secs: i64, utc_offset_secs: i64) -> String {
    epoch_secs
        .checked_add(utc_offset_secs)
        .and_then(|local| DateTime::from_timestamp(local, 0))
        .map(|local| local.format(CLOCK_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_TIME.to_string())
}

/// Current wall-clock time at a location `utc_offset_secs` away from UTC.
///
/// Advisory only: reads the machine clock, not the provider's observation time.
pub fn format_now_at(utc_offset_secs: i64) -> String {
    format_clock_at(Utc::now(), utc_offset_secs)
}

/// Formats `now` shifted by `utc_offset_secs` as a 12-hour clock.
pub fn format_clock_at(now: DateTime<Utc>, utc_offset_secs: i64) -> String {
    format_event_time(now.timestamp(), utc_offset_secs)
}

/// Short day label for a forecast card, e.g. `"Mon, Jan 1"`.
pub fn format_forecast_day(timestamp: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(timestamp, FORECAST_TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.format(FORECAST_DAY_FORMAT).to_string())
}
