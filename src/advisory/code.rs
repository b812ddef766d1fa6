//! WMO weather code classification
//!
//! Maps the integer weather codes delivered by the forecast provider to
//! display text, icon categories and sky themes, and provides the code-range
//! predicates shared by the other advisory components.

use std::fmt;

/// Human-readable description for a WMO weather code
///
/// Codes outside the known table map to "Unknown" rather than failing.
#[must_use]
pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Icy Fog",
        51 => "Light Drizzle",
        53 => "Drizzle",
        55 => "Heavy Drizzle",
        61 => "Light Rain",
        63 => "Rain",
        65 => "Heavy Rain",
        71 => "Light Snow",
        73 => "Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Light Showers",
        81 => "Showers",
        82 => "Heavy Showers",
        85 => "Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm w/ Hail",
        99 => "Thunderstorm w/ Heavy Hail",
        _ => "Unknown",
    }
}

/// Icon bucket for a weather code
///
/// Only the clear codes carry a day/night split; everything else renders the
/// same glyph around the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    ClearDay,
    ClearNight,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Showers,
    SnowShowers,
    Storm,
}

impl IconKind {
    /// Classify a weather code into its icon bucket
    #[must_use]
    pub fn classify(code: u16, is_day: bool) -> Self {
        match code {
            0 | 1 => {
                if is_day {
                    IconKind::ClearDay
                } else {
                    IconKind::ClearNight
                }
            }
            2 | 3 => IconKind::Cloudy,
            45..=48 => IconKind::Fog,
            51..=67 => IconKind::Rain,
            71..=77 => IconKind::Snow,
            80..=82 => IconKind::Showers,
            85..=86 => IconKind::SnowShowers,
            c if c >= 95 => IconKind::Storm,
            _ => IconKind::ClearDay,
        }
    }

    /// Terminal glyph for this icon bucket
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            IconKind::ClearDay => "☀️",
            IconKind::ClearNight => "🌙",
            IconKind::Cloudy => "☁️",
            IconKind::Fog => "🌫️",
            IconKind::Rain => "🌧️",
            IconKind::Snow => "❄️",
            IconKind::Showers => "🌦️",
            IconKind::SnowShowers => "🌨️",
            IconKind::Storm => "⛈️",
        }
    }
}

/// Background/theme category for a weather code
///
/// Night always wins regardless of code, to reflect visual darkness priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyTheme {
    Night,
    Clear,
    Overcast,
    Rain,
    Storm,
    Snow,
}

impl SkyTheme {
    /// Classify a weather code and daylight flag into a sky theme
    #[must_use]
    pub fn classify(code: u16, is_day: bool) -> Self {
        if !is_day {
            return SkyTheme::Night;
        }
        match code {
            0 | 1 => SkyTheme::Clear,
            2 | 3 => SkyTheme::Overcast,
            51..=82 => SkyTheme::Rain,
            c if c >= 95 => SkyTheme::Storm,
            71..=86 => SkyTheme::Snow,
            _ => SkyTheme::Clear,
        }
    }
}

impl fmt::Display for SkyTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyTheme::Night => write!(f, "night sky"),
            SkyTheme::Clear => write!(f, "clear skies"),
            SkyTheme::Overcast => write!(f, "overcast"),
            SkyTheme::Rain => write!(f, "rain"),
            SkyTheme::Storm => write!(f, "storm"),
            SkyTheme::Snow => write!(f, "snow"),
        }
    }
}

/// Any precipitation code, snow included (51-99)
///
/// This is the range the spray and pest components treat as "currently wet".
#[must_use]
pub fn is_wet(code: u16) -> bool {
    (51..=99).contains(&code)
}

/// Rain band used by the crop precaution flags (51-82)
#[must_use]
pub fn is_rain(code: u16) -> bool {
    (51..=82).contains(&code)
}

/// Thunderstorm codes (95 and above)
#[must_use]
pub fn is_storm(code: u16) -> bool {
    code >= 95
}
