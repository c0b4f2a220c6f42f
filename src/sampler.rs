//! Reduces the 3-hour forecast feed to one midday reading per calendar day.

use std::collections::HashSet;

use crate::constants::MIDDAY;
use crate::models::ForecastEntry;

/// Picks the `12:00:00` entry of each date, in source order.
///
/// A date without an exact midday reading contributes nothing. When a date
/// has more than one midday entry the first one wins.
pub fn sample_daily(entries: &[ForecastEntry]) -> Vec<ForecastEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut daily = Vec::new();
    for entry in entries {
        if entry.time_of_day() == Some(MIDDAY) && seen.insert(entry.date.as_str()) {
            daily.push(entry.clone());
        }
    }
    daily
}
