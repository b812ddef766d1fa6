//! Terminal rendering of a full advisory report
//!
//! Formats one snapshot plus its derived advisories into the sections the
//! mobile dashboard used to show: current conditions, outlook, and the
//! advisory cards. All values are computed by the advisory module; this file
//! only formats them.

use crate::advisory::{self, IconKind, SkyTheme, code};
use crate::models::WeatherSnapshot;
use std::fmt::Write;

/// Render the complete advisory report for a snapshot
///
/// When `crop_id` is set the crop precaution section replaces the generic
/// farming tip, mirroring the dashboard behaviour.
#[must_use]
pub fn render(snapshot: &WeatherSnapshot, crop_id: Option<&str>) -> String {
    let mut out = String::new();

    render_header(&mut out, snapshot);
    render_current(&mut out, snapshot);
    render_daily_outlook(&mut out, snapshot);

    match crop_id {
        Some(id) => render_crop_precautions(&mut out, snapshot, id),
        None => render_farming_tip(&mut out, snapshot),
    }

    render_spray(&mut out, snapshot);
    render_irrigation(&mut out, snapshot);
    render_pest(&mut out, snapshot);
    render_work_hours(&mut out, snapshot);
    render_rain_wind_outlook(&mut out, snapshot);

    let _ = writeln!(out, "Weather data: Open-Meteo · Location: OpenStreetMap");
    out
}

fn render_header(out: &mut String, snapshot: &WeatherSnapshot) {
    let location = &snapshot.location;
    let mut place = location.name.clone();
    if let Some(country) = &location.country {
        if !country.is_empty() {
            place = format!("{place} · {country}");
        }
    }
    let _ = writeln!(out, "📍 {place}");
    if !location.area.is_empty() {
        let _ = writeln!(out, "   {}", location.area);
    }
    let theme = SkyTheme::classify(snapshot.current.weather_code, snapshot.current.is_day);
    let _ = writeln!(out, "   {theme}");
    let _ = writeln!(out);
}

fn render_current(out: &mut String, snapshot: &WeatherSnapshot) {
    let current = &snapshot.current;
    let icon = IconKind::classify(current.weather_code, current.is_day);
    let _ = writeln!(
        out,
        "{} {}°C  {}  (feels like {}°C)",
        icon.glyph(),
        current.temperature,
        code::describe(current.weather_code),
        current.feels_like
    );
    if let Some(today) = snapshot.today() {
        let _ = writeln!(out, "   ↑ {}°  ↓ {}°", today.temp_max, today.temp_min);
    }
    let _ = writeln!(
        out,
        "   Humidity {}% (dew point {}°C) · Wind {} km/h {} · Visibility {} km",
        current.humidity,
        current.dew_point,
        current.wind_speed,
        current.wind_cardinal(),
        current.visibility
    );
    let _ = writeln!(
        out,
        "   UV {} ({})",
        current.uv_index.round(),
        uv_label(current.uv_index)
    );
    if let Some(today) = snapshot.today() {
        let _ = writeln!(
            out,
            "   Sunrise {} · Sunset {}",
            today.sunrise.format("%H:%M"),
            today.sunset.format("%H:%M")
        );
    }
    let _ = writeln!(out);
}

fn render_daily_outlook(out: &mut String, snapshot: &WeatherSnapshot) {
    let _ = writeln!(out, "7-DAY FORECAST");
    for (i, day) in snapshot.daily.iter().enumerate() {
        let label = if i == 0 {
            "Today".to_string()
        } else {
            day.date.format("%a %b %-d").to_string()
        };
        let mut line = format!(
            "  {label:<10} {} {:<22} {}°/{}°",
            IconKind::classify(day.weather_code, true).glyph(),
            code::describe(day.weather_code),
            day.temp_min,
            day.temp_max
        );
        if day.precipitation_sum > 0.1 {
            let _ = write!(line, "  💧 {:.1}mm", day.precipitation_sum);
        }
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
}

fn render_farming_tip(out: &mut String, snapshot: &WeatherSnapshot) {
    let tip = advisory::tip::farming_tip(snapshot);
    let _ = writeln!(out, "FARM ADVISORY");
    let _ = writeln!(out, "  {} {}", tip.icon, tip.message);
    let _ = writeln!(out);
}

fn render_crop_precautions(out: &mut String, snapshot: &WeatherSnapshot, crop_id: &str) {
    let heading = advisory::crops::crop_by_id(crop_id)
        .map_or_else(|| crop_id.to_string(), |c| format!("{} {}", c.emoji, c.name));
    let _ = writeln!(out, "{} PRECAUTIONS", heading.to_uppercase());
    for precaution in advisory::crops::crop_precautions(crop_id, snapshot) {
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            precaution.icon, precaution.severity, precaution.title
        );
        let _ = writeln!(out, "      {}", precaution.detail);
    }
    let _ = writeln!(out);
}

fn render_spray(out: &mut String, snapshot: &WeatherSnapshot) {
    let spray = advisory::spray::spray_advisory(snapshot);
    let verdict = if spray.safe { "✅" } else { "❌" };
    let _ = writeln!(out, "SPRAY ADVISORY");
    let _ = writeln!(out, "  {verdict} {}", spray.label);
    let _ = writeln!(out, "      {}", spray.reason);
    if !spray.windows.is_empty() {
        let _ = writeln!(out, "      Best times: {}", spray.windows.join(", "));
    }
    let _ = writeln!(out);
}

fn render_irrigation(out: &mut String, snapshot: &WeatherSnapshot) {
    let need = advisory::irrigation::irrigation_need(snapshot);
    let _ = writeln!(out, "IRRIGATION NEED");
    let _ = writeln!(
        out,
        "  {} {} ({}/10) · ET₀ ≈ {} mm/day",
        score_meter(need.score),
        need.label,
        need.score,
        need.et0_mm
    );
    let _ = writeln!(out, "      {}", need.detail);
    let _ = writeln!(out);
}

fn render_pest(out: &mut String, snapshot: &WeatherSnapshot) {
    let risk = advisory::pest::pest_risk(snapshot);
    let _ = writeln!(out, "PEST & DISEASE RISK");
    let _ = writeln!(
        out,
        "  🍄 Fungal {} ({}/10) — {}",
        risk.fungal_label, risk.fungal_score, risk.fungal_detail
    );
    let _ = writeln!(
        out,
        "  🐛 Insect {} ({}/10) — {}",
        risk.insect_label, risk.insect_score, risk.insect_detail
    );
    let _ = writeln!(out);
}

fn render_work_hours(out: &mut String, snapshot: &WeatherSnapshot) {
    let _ = writeln!(out, "BEST WORKING HOURS TODAY");
    for window in advisory::work_hours::best_work_hours(snapshot) {
        let _ = writeln!(
            out,
            "  {:<6} {} {}/10  {}",
            window.hour,
            score_meter(window.score),
            window.score,
            window.reason
        );
    }
    let _ = writeln!(out);
}

fn render_rain_wind_outlook(out: &mut String, snapshot: &WeatherSnapshot) {
    let _ = writeln!(out, "UPCOMING RAIN & WIND");
    for (i, day) in snapshot.daily.iter().take(3).enumerate() {
        let label = if i == 0 {
            "Today".to_string()
        } else {
            day.date.format("%a").to_string()
        };
        let _ = writeln!(
            out,
            "  {label:<6} {:.1}mm · {} km/h",
            day.precipitation_sum, day.wind_max
        );
    }
    let _ = writeln!(out);
}

/// Five-dot meter for a 0-10 score
fn score_meter(score: u8) -> String {
    let filled = usize::from(score.div_ceil(2));
    format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled))
}

/// UV index display band
fn uv_label(uv: f64) -> &'static str {
    if uv < 3.0 {
        "Low"
    } else if uv < 6.0 {
        "Moderate"
    } else if uv < 8.0 {
        "High"
    } else {
        "Very High"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailySample, HourlySample, Location, WeatherSnapshot};
    use chrono::{NaiveDate, Utc};

    fn create_test_snapshot() -> WeatherSnapshot {
        let base = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let hourly = (0..24i64)
            .map(|i| HourlySample {
                time: base.and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::hours(6 + i),
                temperature: 30.0,
                weather_code: 1,
                precipitation: 0.0,
                is_day: (6 + i) < 19,
            })
            .collect();
        let daily = (0..7i64)
            .map(|i| {
                let date = base + chrono::Duration::days(i);
                DailySample {
                    date,
                    temp_max: 36.0,
                    temp_min: 26.0,
                    weather_code: 1,
                    precipitation_sum: 0.0,
                    wind_max: 15.0,
                    uv_index_max: 8.0,
                    sunrise: date.and_hms_opt(5, 23, 0).unwrap(),
                    sunset: date.and_hms_opt(19, 17, 0).unwrap(),
                }
            })
            .collect();

        let mut location = Location::new(28.6139, 77.209, "New Delhi".to_string());
        location.country = Some("India".to_string());

        WeatherSnapshot {
            location,
            current: CurrentConditions {
                temperature: 34.0,
                feels_like: 36.0,
                humidity: 45.0,
                wind_speed: 12.0,
                wind_direction: 225,
                visibility: 10.0,
                weather_code: 1,
                is_day: true,
                uv_index: 7.0,
                precipitation: 0.0,
                dew_point: 20.0,
            },
            hourly,
            daily,
            retrieved_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_without_crop_shows_generic_tip() {
        let report = render(&create_test_snapshot(), None);
        assert!(report.contains("New Delhi · India"));
        assert!(report.contains("Mainly Clear"));
        assert!(report.contains("FARM ADVISORY"));
        assert!(!report.contains("PRECAUTIONS"));
        assert!(report.contains("SPRAY ADVISORY"));
        assert!(report.contains("IRRIGATION NEED"));
        assert!(report.contains("BEST WORKING HOURS"));
    }

    #[test]
    fn test_report_with_crop_replaces_generic_tip() {
        let report = render(&create_test_snapshot(), Some("wheat"));
        assert!(report.contains("WHEAT PRECAUTIONS"));
        assert!(!report.contains("FARM ADVISORY"));
    }

    #[test]
    fn test_score_meter() {
        assert_eq!(score_meter(0), "○○○○○");
        assert_eq!(score_meter(5), "●●●○○");
        assert_eq!(score_meter(10), "●●●●●");
    }

    #[test]
    fn test_uv_label_bands() {
        assert_eq!(uv_label(1.0), "Low");
        assert_eq!(uv_label(4.0), "Moderate");
        assert_eq!(uv_label(6.5), "High");
        assert_eq!(uv_label(9.0), "Very High");
    }
}
