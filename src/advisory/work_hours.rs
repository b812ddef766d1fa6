//! Best working hours ranking
//!
//! Scores the next 13 forecast hours for outdoor field work and returns the
//! top five. Penalties and bonuses accumulate independently; a score is never
//! reset between rules.

use crate::models::WeatherSnapshot;
use chrono::Timelike;

/// One ranked working-hour slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkWindow {
    /// Short clock label ("6 AM", "12 PM")
    pub hour: String,
    /// Suitability score, 0-10
    pub score: u8,
    /// Penalty tags joined in parentheses, or "ideal"
    pub reason: String,
}

/// Rank the best working hours of the day
///
/// Result is sorted non-increasing by score; ties preserve chronological
/// order. At most five entries are returned.
#[must_use]
pub fn best_work_hours(snapshot: &WeatherSnapshot) -> Vec<WorkWindow> {
    let mut windows: Vec<WorkWindow> = snapshot
        .hourly
        .iter()
        .take(13)
        .map(|sample| {
            let hour = sample.time.hour();
            let mut score: i32 = 10;
            let mut reasons: Vec<&str> = Vec::new();

            if sample.temperature > 38.0 {
                score -= 4;
                reasons.push("extreme heat");
            } else if sample.temperature > 33.0 {
                score -= 2;
                reasons.push("hot");
            } else if sample.temperature < 8.0 {
                score -= 2;
                reasons.push("cold");
            }

            if sample.precipitation > 2.0 {
                score -= 4;
                reasons.push("heavy rain");
            } else if sample.precipitation > 0.0 {
                score -= 2;
                reasons.push("light rain");
            }

            if !sample.is_day {
                score -= 3;
                reasons.push("night");
            }

            if (11..=15).contains(&hour) && sample.is_day {
                score -= 2;
                reasons.push("peak UV");
            }

            // Early morning and evening slots get a small edge
            if (5..=9).contains(&hour) {
                score += 1;
            }
            if (16..=18).contains(&hour) {
                score += 1;
            }

            let score = score.clamp(0, 10) as u8;
            let reason = if reasons.is_empty() {
                "ideal".to_string()
            } else {
                format!("({})", reasons.join(", "))
            };

            WorkWindow {
                hour: short_label(hour),
                score,
                reason,
            }
        })
        .collect();

    // Stable sort keeps chronological order among equal scores
    windows.sort_by(|a, b| b.score.cmp(&a.score));
    windows.truncate(5);
    windows
}

/// Format an hour of day as a short 12-hour label ("12 AM", "4 PM")
#[must_use]
fn short_label(hour: u32) -> String {
    if hour == 0 {
        "12 AM".to_string()
    } else if hour < 12 {
        format!("{hour} AM")
    } else if hour == 12 {
        "12 PM".to_string()
    } else {
        format!("{} PM", hour - 12)
    }
}
