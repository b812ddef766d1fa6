//! Spray safety advisory
//!
//! Decides whether pesticide/fertilizer application is safe right now and,
//! when it is, proposes calm windows from the hourly series.

use crate::advisory::code;
use crate::models::WeatherSnapshot;
use chrono::Timelike;

/// Spray advisory with candidate application windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprayAdvisory {
    /// Whether spraying is currently safe at all
    pub safe: bool,
    /// Short verdict label
    pub label: &'static str,
    /// Why this verdict was reached
    pub reason: String,
    /// Candidate calm windows, chronological, formatted as clock labels
    pub windows: Vec<String>,
}

/// Evaluate spray safety for this snapshot
///
/// Unsafe branches are checked in order: active precipitation first, then
/// wind drift. Safe branches scan the first 14 hourly entries for calm
/// windows (no precipitation, early morning or evening).
#[must_use]
pub fn spray_advisory(snapshot: &WeatherSnapshot) -> SprayAdvisory {
    let current = &snapshot.current;

    if code::is_wet(current.weather_code) {
        return SprayAdvisory {
            safe: false,
            label: "Avoid Spraying",
            reason: "Active rain will wash away chemicals before absorption.".to_string(),
            windows: vec![],
        };
    }
    if current.wind_speed > 20.0 {
        return SprayAdvisory {
            safe: false,
            label: "Avoid Spraying",
            reason: format!(
                "Wind at {} km/h causes drift. Spray only when wind < 15 km/h.",
                current.wind_speed
            ),
            windows: vec![],
        };
    }

    // Calm windows: zero precipitation in the early morning or evening hours
    let mut windows: Vec<String> = Vec::new();
    for sample in snapshot.hourly.iter().take(14) {
        let hour = sample.time.hour();
        if sample.precipitation == 0.0 && (hour <= 9 || hour >= 17) {
            let label = clock_label(hour);
            if !windows.contains(&label) {
                windows.push(label);
            }
        }
    }

    if current.humidity > 85.0 {
        windows.truncate(3);
        return SprayAdvisory {
            safe: true,
            label: "Spray with Caution",
            reason: "High humidity — good for absorption but watch for fungal spread after spraying."
                .to_string(),
            windows,
        };
    }

    windows.truncate(4);
    SprayAdvisory {
        safe: true,
        label: "Good to Spray",
        reason: "Calm conditions. Best time is early morning (6–9 AM) or evening (5–7 PM) to avoid evaporation."
            .to_string(),
        windows,
    }
}

/// Format an hour of day as a 12-hour clock label ("6:00 AM", "12:00 PM")
#[must_use]
fn clock_label(hour: u32) -> String {
    if hour < 12 {
        format!("{}:00 AM", if hour == 0 { 12 } else { hour })
    } else if hour == 12 {
        "12:00 PM".to_string()
    } else {
        format!("{}:00 PM", hour - 12)
    }
}
