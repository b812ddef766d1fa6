//! Generic farming tip selection
//!
//! Produces exactly one tip from current conditions and the 3-day
//! precipitation outlook. Used when the caller has no crop selected; a
//! selected crop routes to the precaution generator instead.

use crate::models::WeatherSnapshot;
use std::fmt;

/// Accent for rendering a tip, one per generic condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipTone {
    Storm,
    Rain,
    Dry,
    Wind,
    Uv,
    Fungal,
    Favourable,
}

impl fmt::Display for TipTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipTone::Storm => write!(f, "storm"),
            TipTone::Rain => write!(f, "rain"),
            TipTone::Dry => write!(f, "dry"),
            TipTone::Wind => write!(f, "wind"),
            TipTone::Uv => write!(f, "uv"),
            TipTone::Fungal => write!(f, "fungal"),
            TipTone::Favourable => write!(f, "favourable"),
        }
    }
}

/// One generic farming tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmingTip {
    pub icon: &'static str,
    pub message: &'static str,
    pub tone: TipTone,
}

/// Select the single applicable tip for this snapshot
///
/// The rules form an ordered chain evaluated top to bottom; the first match
/// wins. The conditions are not mutually exclusive (a storm also satisfies
/// the rain range), so the order is load-bearing.
#[must_use]
pub fn farming_tip(snapshot: &WeatherSnapshot) -> FarmingTip {
    let current = &snapshot.current;
    let max_precip = snapshot.three_day_max_precipitation();

    if current.weather_code >= 95 {
        return FarmingTip {
            icon: "⚡",
            message: "Thunderstorm alert! Stay indoors, secure farm equipment and livestock.",
            tone: TipTone::Storm,
        };
    }
    if (61..=82).contains(&current.weather_code) {
        return FarmingTip {
            icon: "🌧️",
            message: "Rain expected. Avoid spraying pesticides. Check drainage in fields.",
            tone: TipTone::Rain,
        };
    }
    if max_precip < 1.0 && current.humidity < 40.0 {
        return FarmingTip {
            icon: "💧",
            message: "Dry conditions ahead. Irrigate crops and mulch soil to retain moisture.",
            tone: TipTone::Dry,
        };
    }
    if current.wind_speed > 30.0 {
        return FarmingTip {
            icon: "💨",
            message: "High winds today. Avoid aerial spraying. Stake tall plants if needed.",
            tone: TipTone::Wind,
        };
    }
    if current.uv_index >= 8.0 {
        return FarmingTip {
            icon: "☀️",
            message: "Intense UV today. Best to work in early morning or after 4PM.",
            tone: TipTone::Uv,
        };
    }
    if current.humidity > 85.0 {
        return FarmingTip {
            icon: "🍄",
            message: "High humidity — watch for fungal diseases on crops. Improve ventilation.",
            tone: TipTone::Fungal,
        };
    }
    FarmingTip {
        icon: "🌱",
        message: "Good conditions for field work. Ideal time to water, weed, or transplant.",
        tone: TipTone::Favourable,
    }
}
