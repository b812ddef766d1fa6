//! Irrigation need estimation
//!
//! Estimates today's reference evapotranspiration with a simplified
//! Hargreaves-Samani approximation and turns it into a 0-10 need score.
//! The extraterrestrial-radiation term is a UV-index proxy, not the full
//! solar-geometry formula; the score thresholds are tuned against this
//! approximation, so it must not be swapped for the textbook version.

use crate::models::WeatherSnapshot;

/// Irrigation need assessment
#[derive(Debug, Clone, PartialEq)]
pub struct IrrigationNeed {
    /// Need score, 0-10
    pub score: u8,
    /// Need band label
    pub label: &'static str,
    /// Estimated reference evapotranspiration in mm/day, one decimal
    pub et0_mm: f64,
    /// Actionable explanation for the score
    pub detail: String,
}

/// Estimate irrigation need for this snapshot
///
/// An empty daily series degrades to a zero temperature range, which drives
/// ET0 to zero rather than failing.
#[must_use]
pub fn irrigation_need(snapshot: &WeatherSnapshot) -> IrrigationNeed {
    let current = &snapshot.current;

    let (t_max, t_min) = snapshot
        .today()
        .map_or((0.0, 0.0), |d| (d.temp_max, d.temp_min));
    let t_range = t_max - t_min;
    let t_mean = (t_max + t_min) / 2.0;
    // UV-index proxy for extraterrestrial radiation
    let ra = (current.uv_index / 10.0) * 15.0;
    let et0 = (0.0023 * (t_mean + 17.8) * t_range.abs().sqrt() * ra).max(0.0);
    let et_mm = (et0 * 10.0).round() / 10.0;

    let recent_rain = snapshot.two_day_rain_sum();
    let wind_factor = if current.wind_speed > 20.0 { 1.2 } else { 1.0 };
    let mut score = ((et_mm - recent_rain * 0.4) * wind_factor * 1.5)
        .round()
        .clamp(0.0, 10.0) as i32;

    if current.humidity < 35.0 {
        score = (score + 2).min(10);
    }
    if current.humidity > 75.0 {
        score = (score - 1).max(0);
    }
    let score = score as u8;

    let (label, detail) = match score {
        0..=2 => (
            "Not Needed",
            "Soil likely has adequate moisture. Skip irrigation today to avoid waterlogging."
                .to_string(),
        ),
        3..=4 => (
            "Low Need",
            format!("Evapotranspiration is low (~{et_mm} mm). Light irrigation in 2–3 days should suffice."),
        ),
        5..=6 => (
            "Moderate Need",
            format!("Estimated ET: ~{et_mm} mm/day. Consider irrigating within 24 hours, especially sandy soils."),
        ),
        7..=8 => (
            "High Need",
            format!("ET ~{et_mm} mm/day with low recent rainfall. Irrigate today, preferably at dawn or dusk."),
        ),
        _ => (
            "Critical",
            format!("ET ~{et_mm} mm/day in hot dry conditions. Irrigate immediately to prevent wilting and yield loss."),
        ),
    };

    IrrigationNeed {
        score,
        label,
        et0_mm: et_mm,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailySample, Location, WeatherSnapshot};
    use chrono::{NaiveDate, Utc};

    fn create_test_snapshot(
        t_max: f64,
        t_min: f64,
        uv: f64,
        humidity: f64,
        wind: f64,
        rain: [f64; 2],
    ) -> WeatherSnapshot {
        let base = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let daily = rain
            .iter()
            .enumerate()
            .map(|(i, &sum)| {
                let date = base + chrono::Duration::days(i as i64);
                DailySample {
                    date,
                    temp_max: t_max,
                    temp_min: t_min,
                    weather_code: 1,
                    precipitation_sum: sum,
                    wind_max: wind,
                    uv_index_max: uv,
                    sunrise: date.and_hms_opt(5, 30, 0).unwrap(),
                    sunset: date.and_hms_opt(19, 0, 0).unwrap(),
                }
            })
            .collect();

        WeatherSnapshot {
            location: Location::new(28.6139, 77.209, "New Delhi".to_string()),
            current: CurrentConditions {
                temperature: (t_max + t_min) / 2.0,
                feels_like: (t_max + t_min) / 2.0,
                humidity,
                wind_speed: wind,
                wind_direction: 270,
                visibility: 10.0,
                weather_code: 1,
                is_day: true,
                uv_index: uv,
                precipitation: 0.0,
                dew_point: 12.0,
            },
            hourly: vec![],
            daily,
            retrieved_at: Utc::now(),
        }
    }

    #[test]
    fn test_zero_uv_means_zero_et0() {
        let need = irrigation_need(&create_test_snapshot(30.0, 18.0, 0.0, 50.0, 5.0, [0.0, 0.0]));
        assert_eq!(need.et0_mm, 0.0);
        assert_eq!(need.score, 0);
        assert_eq!(need.label, "Not Needed");
    }

    #[test]
    fn test_hot_dry_day_scores_high() {
        // 42/28 with UV 9 and no recent rain: ET0 ≈ 0.0023*52.8*sqrt(14)*13.5 ≈ 6.1
        let need = irrigation_need(&create_test_snapshot(42.0, 28.0, 9.0, 30.0, 10.0, [0.0, 0.0]));
        assert_eq!(need.et0_mm, 6.1);
        // round(6.1 * 1.5) = 9, +2 for dry air, capped at 10
        assert_eq!(need.score, 10);
        assert_eq!(need.label, "Critical");
        assert!(need.detail.contains("6.1"));
    }

    #[test]
    fn test_recent_rain_offsets_demand() {
        let dry = irrigation_need(&create_test_snapshot(34.0, 22.0, 7.0, 55.0, 10.0, [0.0, 0.0]));
        let wet = irrigation_need(&create_test_snapshot(34.0, 22.0, 7.0, 55.0, 10.0, [8.0, 6.0]));
        assert!(wet.score < dry.score);
    }

    #[test]
    fn test_humid_air_reduces_score_by_one() {
        let neutral = irrigation_need(&create_test_snapshot(34.0, 22.0, 7.0, 55.0, 10.0, [0.0, 0.0]));
        let humid = irrigation_need(&create_test_snapshot(34.0, 22.0, 7.0, 80.0, 10.0, [0.0, 0.0]));
        assert_eq!(i32::from(humid.score), i32::from(neutral.score) - 1);
    }

    #[test]
    fn test_strong_wind_raises_demand() {
        let calm = irrigation_need(&create_test_snapshot(34.0, 22.0, 6.0, 55.0, 10.0, [0.0, 0.0]));
        let windy = irrigation_need(&create_test_snapshot(34.0, 22.0, 6.0, 55.0, 25.0, [0.0, 0.0]));
        assert!(windy.score >= calm.score);
    }

    #[test]
    fn test_score_bounded_under_extreme_input() {
        let extreme = irrigation_need(&create_test_snapshot(60.0, -10.0, 11.0, -5.0, 80.0, [0.0, 0.0]));
        assert!(extreme.score <= 10);

        let soaked = irrigation_need(&create_test_snapshot(20.0, 15.0, 2.0, 100.0, 5.0, [80.0, 90.0]));
        assert_eq!(soaked.score, 0);
    }

    #[test]
    fn test_empty_daily_degrades_gracefully() {
        let mut snapshot = create_test_snapshot(30.0, 20.0, 8.0, 50.0, 5.0, [0.0, 0.0]);
        snapshot.daily.clear();
        let need = irrigation_need(&snapshot);
        // Zero temperature range drives ET0 to zero
        assert_eq!(need.et0_mm, 0.0);
        assert_eq!(need.score, 0);
    }
}
