//! Weather and geocoding boundary
//!
//! Fetches multi-horizon forecasts from the Open-Meteo API and resolves
//! location names. Everything here is a collaborator of the advisory engine:
//! it produces `WeatherSnapshot`s but never interprets them.

use crate::config::WeatherConfig;
use crate::models::{Location, WeatherSnapshot};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of weather snapshots
///
/// The advisory engine itself never fetches; hosts pick an implementation
/// and hand the resulting snapshot to the pure functions.
#[async_trait]
pub trait ForecastProvider {
    /// Fetch a fresh snapshot for the given location
    async fn fetch_snapshot(&self, location: &Location) -> Result<WeatherSnapshot>;
}

/// Display-only place metadata from reverse geocoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceName {
    pub city: String,
    pub area: String,
    pub country: String,
}

/// Open-Meteo API client with retrying HTTP transport
pub struct OpenMeteoClient {
    http: ClientWithMiddleware,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a client from weather configuration
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("agrocast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to build HTTP client")?;
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        Ok(Self { http, config })
    }

    /// Resolve a location name to coordinates via the Open-Meteo geocoding API
    pub async fn geocode(&self, location_name: &str) -> Result<Vec<Location>> {
        if location_name.trim().is_empty() {
            return Err(anyhow!("Location cannot be empty"));
        }

        let url = format!(
            "{}?name={}&count=5&language=en&format=json",
            self.config.geocoding_url,
            urlencoding::encode(location_name)
        );

        let response = self.http.get(url).send().await?;
        let geocoding_response: openmeteo::GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

        Ok(geocoding_response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect())
    }

    /// Resolve coordinates to display-only place metadata
    ///
    /// Never fails: any error degrades to a generic "Your Location" label,
    /// since nothing downstream depends on the name.
    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> PlaceName {
        match self.reverse_geocode_call(latitude, longitude).await {
            Ok(place) => place,
            Err(e) => {
                warn!("Reverse geocoding failed: {e}");
                PlaceName {
                    city: "Your Location".to_string(),
                    area: String::new(),
                    country: String::new(),
                }
            }
        }
    }

    async fn reverse_geocode_call(&self, latitude: f64, longitude: f64) -> Result<PlaceName> {
        let url = format!(
            "{}?lat={latitude}&lon={longitude}&format=json",
            self.config.reverse_geocoding_url
        );

        let response = self
            .http
            .get(url)
            .header("Accept-Language", "en")
            .send()
            .await?;
        let reverse: nominatim::ReverseResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse reverse geocoding response")?;

        Ok(reverse.into_place_name())
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_snapshot(&self, location: &Location) -> Result<WeatherSnapshot> {
        debug!(
            "Fetching forecast for {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );

        let current_fields = [
            "temperature_2m",
            "apparent_temperature",
            "relative_humidity_2m",
            "wind_speed_10m",
            "wind_direction_10m",
            "visibility",
            "weather_code",
            "is_day",
            "uv_index",
            "precipitation",
            "dew_point_2m",
        ]
        .join(",");
        let daily_fields = [
            "temperature_2m_max",
            "temperature_2m_min",
            "weather_code",
            "precipitation_sum",
            "wind_speed_10m_max",
            "uv_index_max",
            "sunrise",
            "sunset",
        ]
        .join(",");

        let response = self
            .http
            .get(&self.config.forecast_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", current_fields),
                (
                    "hourly",
                    "temperature_2m,weather_code,precipitation,is_day".to_string(),
                ),
                ("daily", daily_fields),
                ("timezone", "auto".to_string()),
                ("forecast_days", self.config.forecast_days.to_string()),
            ])
            .send()
            .await?;

        let forecast_response: openmeteo::ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        Ok(WeatherSnapshot::from_openmeteo(
            &forecast_response,
            location.clone(),
        ))
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use super::{Location, WeatherSnapshot};
    use crate::models::{CurrentConditions, DailySample, HourlySample};
    use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
    use serde::Deserialize;

    /// Current weather and forecast response from `OpenMeteo` API
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: CurrentData,
        pub hourly: HourlyData,
        pub daily: DailyData,
    }

    /// Current conditions block from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        pub temperature_2m: f64,
        pub apparent_temperature: f64,
        pub relative_humidity_2m: f64,
        pub wind_speed_10m: f64,
        pub wind_direction_10m: f64,
        pub visibility: Option<f64>,
        pub weather_code: u16,
        pub is_day: u8,
        pub uv_index: Option<f64>,
        pub precipitation: Option<f64>,
        pub dew_point_2m: f64,
    }

    /// Hourly weather data from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        pub temperature_2m: Vec<Option<f64>>,
        pub weather_code: Vec<Option<u16>>,
        pub precipitation: Vec<Option<f64>>,
        pub is_day: Vec<Option<u8>>,
    }

    /// Daily weather data from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<String>,
        pub temperature_2m_max: Vec<Option<f64>>,
        pub temperature_2m_min: Vec<Option<f64>>,
        pub weather_code: Vec<Option<u16>>,
        pub precipitation_sum: Vec<Option<f64>>,
        pub wind_speed_10m_max: Vec<Option<f64>>,
        pub uv_index_max: Vec<Option<f64>>,
        pub sunrise: Vec<String>,
        pub sunset: Vec<String>,
    }

    /// Geocoding response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            let area = result
                .admin1
                .filter(|admin| admin != &result.name)
                .unwrap_or_default();
            Location {
                latitude: result.latitude,
                longitude: result.longitude,
                name: result.name,
                area,
                country: result.country,
            }
        }
    }

    fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok()
    }

    fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    impl WeatherSnapshot {
        /// Create a snapshot from an `OpenMeteo` API response
        ///
        /// The hourly series is aligned so index 0 is the current hour, and
        /// values are rounded to display precision on the way in. Missing
        /// optional fields degrade to neutral values.
        #[must_use]
        pub fn from_openmeteo(response: &ForecastResponse, location: Location) -> Self {
            let current = &response.current;

            let conditions = CurrentConditions {
                temperature: current.temperature_2m.round(),
                feels_like: current.apparent_temperature.round(),
                humidity: current.relative_humidity_2m,
                wind_speed: current.wind_speed_10m.round(),
                wind_direction: (current.wind_direction_10m.rem_euclid(360.0)).round() as u16,
                visibility: (current.visibility.unwrap_or(10_000.0) / 1000.0).round(),
                weather_code: current.weather_code,
                is_day: current.is_day != 0,
                uv_index: current.uv_index.unwrap_or(0.0),
                precipitation: current.precipitation.unwrap_or(0.0),
                dew_point: current.dew_point_2m.round(),
            };

            // Align the hourly series so that index 0 is the current hour
            let now_hour = parse_local_time(&current.time);
            let start_idx = now_hour
                .and_then(|now| {
                    response.hourly.time.iter().position(|raw| {
                        parse_local_time(raw).is_some_and(|parsed| {
                            parsed.date() == now.date() && parsed.hour() == now.hour()
                        })
                    })
                })
                .unwrap_or(0);

            let hourly = response
                .hourly
                .time
                .iter()
                .enumerate()
                .skip(start_idx)
                .take(24)
                .filter_map(|(i, raw_time)| {
                    let time = parse_local_time(raw_time)?;
                    Some(HourlySample {
                        time,
                        temperature: value_at(&response.hourly.temperature_2m, i, 0.0).round(),
                        weather_code: value_at(&response.hourly.weather_code, i, 0),
                        precipitation: value_at(&response.hourly.precipitation, i, 0.0),
                        is_day: value_at(&response.hourly.is_day, i, 1) != 0,
                    })
                })
                .collect();

            let daily = response
                .daily
                .time
                .iter()
                .enumerate()
                .filter_map(|(i, raw_date)| {
                    let date = parse_date(raw_date)?;
                    let fallback_sunrise = date.and_hms_opt(6, 0, 0)?;
                    let fallback_sunset = date.and_hms_opt(18, 0, 0)?;
                    Some(DailySample {
                        date,
                        temp_max: value_at(&response.daily.temperature_2m_max, i, 0.0).round(),
                        temp_min: value_at(&response.daily.temperature_2m_min, i, 0.0).round(),
                        weather_code: value_at(&response.daily.weather_code, i, 0),
                        precipitation_sum: value_at(&response.daily.precipitation_sum, i, 0.0),
                        wind_max: value_at(&response.daily.wind_speed_10m_max, i, 0.0).round(),
                        uv_index_max: value_at(&response.daily.uv_index_max, i, 0.0),
                        sunrise: response
                            .daily
                            .sunrise
                            .get(i)
                            .and_then(|s| parse_local_time(s))
                            .unwrap_or(fallback_sunrise),
                        sunset: response
                            .daily
                            .sunset
                            .get(i)
                            .and_then(|s| parse_local_time(s))
                            .unwrap_or(fallback_sunset),
                    })
                })
                .collect();

            Self {
                location,
                current: conditions,
                hourly,
                daily,
                retrieved_at: Utc::now(),
            }
        }
    }

    /// Extract a series value with safe indexing and a default for holes
    fn value_at<T: Copy>(series: &[Option<T>], index: usize, default: T) -> T {
        series.get(index).copied().flatten().unwrap_or(default)
    }
}

/// Nominatim reverse geocoding response structures
mod nominatim {
    use super::PlaceName;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ReverseResponse {
        pub address: Option<Address>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Address {
        pub city: Option<String>,
        pub town: Option<String>,
        pub village: Option<String>,
        pub county: Option<String>,
        pub neighbourhood: Option<String>,
        pub suburb: Option<String>,
        pub quarter: Option<String>,
        pub district: Option<String>,
        pub state_district: Option<String>,
        pub state: Option<String>,
        pub country: Option<String>,
    }

    impl ReverseResponse {
        /// Pick the most specific display fields out of the address
        pub fn into_place_name(self) -> PlaceName {
            let addr = self.address.unwrap_or_default();
            let city = [addr.city, addr.town, addr.village, addr.county]
                .into_iter()
                .flatten()
                .next()
                .unwrap_or_else(|| "Unknown".to_string());
            let area = [
                addr.neighbourhood,
                addr.suburb,
                addr.quarter,
                addr.district,
                addr.state_district,
                addr.state,
            ]
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_default();

            PlaceName {
                area: if area == city { String::new() } else { area },
                city,
                country: addr.country.unwrap_or_default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "current": {
            "time": "2024-06-10T14:15",
            "temperature_2m": 33.6,
            "apparent_temperature": 36.2,
            "relative_humidity_2m": 48,
            "wind_speed_10m": 12.4,
            "wind_direction_10m": 224.0,
            "visibility": 24140.0,
            "weather_code": 1,
            "is_day": 1,
            "uv_index": 7.5,
            "precipitation": 0.0,
            "dew_point_2m": 21.3
        },
        "hourly": {
            "time": ["2024-06-10T12:00", "2024-06-10T13:00", "2024-06-10T14:00", "2024-06-10T15:00"],
            "temperature_2m": [31.0, 32.5, 33.6, 34.0],
            "weather_code": [1, 1, 1, 2],
            "precipitation": [0.0, 0.0, null, 0.2],
            "is_day": [1, 1, 1, 1]
        },
        "daily": {
            "time": ["2024-06-10", "2024-06-11"],
            "temperature_2m_max": [38.2, 36.9],
            "temperature_2m_min": [27.4, 26.8],
            "weather_code": [1, 3],
            "precipitation_sum": [0.0, 1.2],
            "wind_speed_10m_max": [18.7, 22.1],
            "uv_index_max": [8.4, null],
            "sunrise": ["2024-06-10T05:23", "2024-06-11T05:23"],
            "sunset": ["2024-06-10T19:17", "2024-06-11T19:18"]
        }
    }"#;

    #[test]
    fn test_snapshot_conversion_aligns_and_rounds() {
        let response: super::openmeteo::ForecastResponse =
            serde_json::from_str(FORECAST_JSON).unwrap();
        let location = Location::new(28.6139, 77.209, "New Delhi".to_string());
        let snapshot = WeatherSnapshot::from_openmeteo(&response, location);

        // Display-precision rounding on the way in
        assert_eq!(snapshot.current.temperature, 34.0);
        assert_eq!(snapshot.current.feels_like, 36.0);
        assert_eq!(snapshot.current.wind_speed, 12.0);
        assert_eq!(snapshot.current.wind_direction, 224);
        assert_eq!(snapshot.current.visibility, 24.0);
        assert!(snapshot.current.is_day);

        // Hourly series starts at the current hour (14:00), not the raw start
        assert_eq!(snapshot.hourly.len(), 2);
        assert_eq!(snapshot.hourly[0].time.to_string(), "2024-06-10 14:00:00");
        // A null precipitation hole degrades to zero
        assert_eq!(snapshot.hourly[0].precipitation, 0.0);
        assert_eq!(snapshot.hourly[1].precipitation, 0.2);

        assert_eq!(snapshot.daily.len(), 2);
        assert_eq!(snapshot.daily[0].temp_max, 38.0);
        assert_eq!(snapshot.daily[1].uv_index_max, 0.0);
        assert_eq!(snapshot.daily[0].sunrise.to_string(), "2024-06-10 05:23:00");
    }

    #[test]
    fn test_unmatched_current_hour_falls_back_to_start() {
        let mut json: serde_json::Value = serde_json::from_str(FORECAST_JSON).unwrap();
        json["current"]["time"] = "2024-06-12T02:00".into();
        let response: super::openmeteo::ForecastResponse =
            serde_json::from_value(json).unwrap();
        let location = Location::new(28.6139, 77.209, "New Delhi".to_string());
        let snapshot = WeatherSnapshot::from_openmeteo(&response, location);
        assert_eq!(snapshot.hourly.len(), 4);
        assert_eq!(snapshot.hourly[0].time.to_string(), "2024-06-10 12:00:00");
    }

    #[test]
    fn test_reverse_response_prefers_most_specific_fields() {
        let json = r#"{
            "address": {
                "suburb": "Hauz Khas",
                "city": "New Delhi",
                "state": "Delhi",
                "country": "India"
            }
        }"#;
        let response: super::nominatim::ReverseResponse = serde_json::from_str(json).unwrap();
        let place = response.into_place_name();
        assert_eq!(place.city, "New Delhi");
        assert_eq!(place.area, "Hauz Khas");
        assert_eq!(place.country, "India");
    }

    #[test]
    fn test_reverse_response_drops_area_matching_city() {
        let json = r#"{"address": {"village": "Khed", "district": "Khed", "country": "India"}}"#;
        let response: super::nominatim::ReverseResponse = serde_json::from_str(json).unwrap();
        let place = response.into_place_name();
        assert_eq!(place.city, "Khed");
        assert_eq!(place.area, "");
    }

    #[test]
    fn test_reverse_response_without_address() {
        let response: super::nominatim::ReverseResponse =
            serde_json::from_str("{}").unwrap();
        let place = response.into_place_name();
        assert_eq!(place.city, "Unknown");
        assert_eq!(place.area, "");
        assert_eq!(place.country, "");
    }
}
