//! Pest and disease risk scoring
//!
//! Two independent additive scores: fungal pressure driven by humidity, rain
//! and mild temperatures; insect pressure driven by warm, dry weather.

use crate::advisory::code;
use crate::models::WeatherSnapshot;

/// Combined pest and disease risk assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PestRisk {
    /// Fungal disease pressure, 0-10
    pub fungal_score: u8,
    /// Insect pest pressure, 0-10
    pub insect_score: u8,
    /// Fungal risk band
    pub fungal_label: &'static str,
    /// Insect risk band
    pub insect_label: &'static str,
    /// Fungal scouting guidance
    pub fungal_detail: &'static str,
    /// Insect scouting guidance
    pub insect_detail: &'static str,
}

/// Score pest and disease risk for this snapshot
#[must_use]
pub fn pest_risk(snapshot: &WeatherSnapshot) -> PestRisk {
    let current = &snapshot.current;
    let recent_rain = snapshot.two_day_rain_sum();
    let is_wet = code::is_wet(current.weather_code);

    let mut fungal_score = 0u8;
    if current.humidity > 80.0 {
        fungal_score += 4;
    } else if current.humidity > 65.0 {
        fungal_score += 2;
    }
    if recent_rain > 5.0 {
        fungal_score += 3;
    } else if recent_rain > 0.0 {
        fungal_score += 1;
    }
    if (18.0..=28.0).contains(&current.temperature) {
        fungal_score += 2;
    }
    if is_wet {
        fungal_score += 1;
    }
    let fungal_score = fungal_score.min(10);

    let mut insect_score = 0u8;
    if (25.0..=38.0).contains(&current.temperature) {
        insect_score += 4;
    } else if current.temperature >= 20.0 {
        insect_score += 2;
    }
    if current.humidity < 50.0 {
        insect_score += 3;
    } else if current.humidity < 65.0 {
        insect_score += 1;
    }
    if !is_wet {
        insect_score += 2;
    }
    let insect_score = insect_score.min(10);

    PestRisk {
        fungal_score,
        insect_score,
        fungal_label: risk_label(fungal_score),
        insect_label: risk_label(insect_score),
        fungal_detail: if fungal_score > 6 {
            "Prime fungal conditions. Scout crops daily. Apply preventive fungicide."
        } else if fungal_score > 4 {
            "Moderate fungal risk. Check for early symptoms on leaves and stems."
        } else {
            "Low fungal pressure today. Continue regular monitoring."
        },
        insect_detail: if insect_score > 6 {
            "High insect activity likely. Check for aphids, thrips, or stem borers."
        } else if insect_score > 4 {
            "Moderate insect presence. Use yellow sticky traps for early detection."
        } else {
            "Low insect pressure. Favourable conditions for beneficials like bees."
        },
    }
}

/// Risk band for a 0-10 score
#[must_use]
fn risk_label(score: u8) -> &'static str {
    match score {
        0..=2 => "Low",
        3..=5 => "Moderate",
        6..=7 => "High",
        _ => "Very High",
    }
}
