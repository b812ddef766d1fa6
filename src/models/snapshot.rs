//! Weather snapshot model
//!
//! One `WeatherSnapshot` is materialized per refresh cycle and treated as
//! immutable for the lifetime of one advisory computation. Every advisory
//! function is a pure read of this structure.

use super::Location;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current observed conditions at the snapshot location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Apparent (feels-like) temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: u16,
    /// Visibility in kilometers
    pub visibility: f64,
    /// WMO weather code
    pub weather_code: u16,
    /// Daylight flag
    pub is_day: bool,
    /// UV index
    pub uv_index: f64,
    /// Precipitation rate in mm
    pub precipitation: f64,
    /// Dew point in Celsius
    pub dew_point: f64,
}

impl CurrentConditions {
    /// Convert wind direction from degrees to one of eight cardinal directions
    #[must_use]
    pub fn wind_cardinal(&self) -> &'static str {
        const DIRS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        DIRS[((f64::from(self.wind_direction) / 45.0).round() as usize) % 8]
    }
}

/// One hourly forecast sample
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HourlySample {
    /// Local forecast time
    pub time: NaiveDateTime,
    /// Air temperature in Celsius
    pub temperature: f64,
    /// WMO weather code
    pub weather_code: u16,
    /// Precipitation amount in mm
    pub precipitation: f64,
    /// Daylight flag
    pub is_day: bool,
}

/// One daily forecast sample
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailySample {
    /// Forecast date
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// WMO weather code
    pub weather_code: u16,
    /// Precipitation sum in mm
    pub precipitation_sum: f64,
    /// Maximum wind speed in km/h
    pub wind_max: f64,
    /// Maximum UV index
    pub uv_index_max: f64,
    /// Local sunrise time
    pub sunrise: NaiveDateTime,
    /// Local sunset time
    pub sunset: NaiveDateTime,
}

/// Multi-horizon weather snapshot for one location
///
/// `hourly` is chronological with index 0 meaning "now"; `daily` starts at
/// today. Callers are expected to provide at least one entry in each series;
/// the accessors below degrade to neutral values when they cannot.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherSnapshot {
    /// Location this snapshot was taken for
    pub location: Location,
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly series, conventionally 24 entries starting at the current hour
    pub hourly: Vec<HourlySample>,
    /// Daily series, conventionally 7 entries starting today
    pub daily: Vec<DailySample>,
    /// When this snapshot was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Today's daily sample, when the series is non-empty
    #[must_use]
    pub fn today(&self) -> Option<&DailySample> {
        self.daily.first()
    }

    /// Precipitation sum over today and tomorrow, in mm
    #[must_use]
    pub fn two_day_rain_sum(&self) -> f64 {
        self.daily.iter().take(2).map(|d| d.precipitation_sum).sum()
    }

    /// Largest daily precipitation sum over the next three days, in mm
    ///
    /// An empty series yields 0 rather than failing.
    #[must_use]
    pub fn three_day_max_precipitation(&self) -> f64 {
        self.daily
            .iter()
            .take(3)
            .map(|d| d.precipitation_sum)
            .fold(0.0, f64::max)
    }

    /// Check if snapshot data is still fresh (not older than cache TTL)
    #[must_use]
    pub fn is_fresh(&self, ttl_hours: u32) -> bool {
        let age = Utc::now() - self.retrieved_at;
        age.num_hours() < i64::from(ttl_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_day(offset: u64, precipitation_sum: f64) -> DailySample {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + chrono::Duration::days(offset as i64);
        DailySample {
            date,
            temp_max: 32.0,
            temp_min: 21.0,
            weather_code: 1,
            precipitation_sum,
            wind_max: 14.0,
            uv_index_max: 7.0,
            sunrise: date.and_hms_opt(5, 45, 0).unwrap(),
            sunset: date.and_hms_opt(19, 10, 0).unwrap(),
        }
    }

    fn snapshot_with_daily(daily: Vec<DailySample>) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location::new(28.6139, 77.209, "New Delhi".to_string()),
            current: CurrentConditions {
                temperature: 30.0,
                feels_like: 32.0,
                humidity: 55.0,
                wind_speed: 10.0,
                wind_direction: 180,
                visibility: 10.0,
                weather_code: 1,
                is_day: true,
                uv_index: 6.0,
                precipitation: 0.0,
                dew_point: 20.0,
            },
            hourly: vec![],
            daily,
            retrieved_at: Utc::now(),
        }
    }

    #[test]
    fn test_two_day_rain_sum() {
        let snapshot = snapshot_with_daily(vec![
            sample_day(0, 2.5),
            sample_day(1, 1.5),
            sample_day(2, 9.0),
        ]);
        assert_eq!(snapshot.two_day_rain_sum(), 4.0);
    }

    #[test]
    fn test_three_day_max_precipitation() {
        let snapshot = snapshot_with_daily(vec![
            sample_day(0, 0.2),
            sample_day(1, 6.4),
            sample_day(2, 3.0),
            sample_day(3, 22.0),
        ]);
        assert_eq!(snapshot.three_day_max_precipitation(), 6.4);
    }

    #[test]
    fn test_empty_daily_degrades_to_zero() {
        let snapshot = snapshot_with_daily(vec![]);
        assert!(snapshot.today().is_none());
        assert_eq!(snapshot.two_day_rain_sum(), 0.0);
        assert_eq!(snapshot.three_day_max_precipitation(), 0.0);
    }

    #[test]
    fn test_wind_cardinal() {
        let mut snapshot = snapshot_with_daily(vec![]);
        snapshot.current.wind_direction = 0;
        assert_eq!(snapshot.current.wind_cardinal(), "N");
        snapshot.current.wind_direction = 90;
        assert_eq!(snapshot.current.wind_cardinal(), "E");
        snapshot.current.wind_direction = 210;
        assert_eq!(snapshot.current.wind_cardinal(), "SW");
        snapshot.current.wind_direction = 350;
        assert_eq!(snapshot.current.wind_cardinal(), "N");
    }
}
