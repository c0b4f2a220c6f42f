//! Background gradients keyed by weather condition.

use serde::Serialize;

/// Two-color top-to-bottom background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub top: &'static str,
    pub bottom: &'static str,
}

impl Gradient {
    const fn new(top: &'static str, bottom: &'static str) -> Self {
        Self { top, bottom }
    }

    /// CSS `linear-gradient` value
    pub fn css(&self) -> String {
        format!("linear-gradient(to bottom, {}, {})", self.top, self.bottom)
    }
}

pub const CLEAR: Gradient = Gradient::new("#fceabb", "#f8b500");
pub const CLOUDS: Gradient = Gradient::new("#d7d2cc", "#304352");
pub const RAIN: Gradient = Gradient::new("#314755", "#26a0da");
pub const SNOW: Gradient = Gradient::new("#e6dada", "#274046");
pub const THUNDERSTORM: Gradient = Gradient::new("#373B44", "#4286f4");
pub const DRIZZLE: Gradient = Gradient::new("#89f7fe", "#66a6ff");
pub const MIST: Gradient = Gradient::new("#bdc3c7", "#2c3e50");
pub const DEFAULT: Gradient = Gradient::new("#a1c4fd", "#c2e9fb");

/// Maps a condition label to its background, case-insensitively.
pub fn theme_for(condition: &str) -> Gradient {
    match condition.to_lowercase().as_str() {
        "clear" => CLEAR,
        "clouds" => CLOUDS,
        "rain" => RAIN,
        "snow" => SNOW,
        "thunderstorm" => THUNDERSTORM,
        "drizzle" => DRIZZLE,
        "mist" | "fog" => MIST,
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(theme_for("RAIN"), RAIN);
        assert_eq!(theme_for("rain"), RAIN);
        assert_eq!(theme_for("Rain"), RAIN);
    }

    #[test]
    fn test_mist_and_fog_share_gradient() {
        assert_eq!(theme_for("Mist"), theme_for("Fog"));
    }

    #[test]
    fn test_unknown_and_empty_default() {
        assert_eq!(theme_for("tornado"), DEFAULT);
        assert_eq!(theme_for(""), DEFAULT);
        assert_eq!(theme_for("Haze"), DEFAULT);
    }

    #[test]
    fn test_each_known_label() {
        assert_eq!(theme_for("Clear"), CLEAR);
        assert_eq!(theme_for("Clouds"), CLOUDS);
        assert_eq!(theme_for("Snow"), SNOW);
        assert_eq!(theme_for("Thunderstorm"), THUNDERSTORM);
        assert_eq!(theme_for("Drizzle"), DRIZZLE);
    }

    #[test]
    fn test_css() {
        assert_eq!(CLEAR.css(), "linear-gradient(to bottom, #fceabb, #f8b500)");
    }
}
