//! Configuration management for the `AgroCast` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::AgroCastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `AgroCast` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgroCastConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_url: String,
    /// Base URL for the reverse geocoding API
    #[serde(default = "default_reverse_geocoding_base_url")]
    pub reverse_geocoding_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
    /// Forecast horizon in days
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Fallback latitude when no location is given
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Fallback longitude when no location is given
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Selected crop id, persisted across runs
    #[serde(default)]
    pub crop: Option<String>,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_reverse_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_forecast_days() -> u32 {
    7
}

fn default_cache_ttl() -> u32 {
    1
}

fn default_cache_location() -> String {
    ProjectDirs::from("", "", "agrocast")
        .map(|dirs| dirs.cache_dir().to_string_lossy().into_owned())
        .unwrap_or_else(|| ".agrocast-cache".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

// New Delhi, the fallback the mobile app used when location was denied
fn default_latitude() -> f64 {
    28.6139
}

fn default_longitude() -> f64 {
    77.209
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_base_url(),
            geocoding_url: default_geocoding_base_url(),
            reverse_geocoding_url: default_reverse_geocoding_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            crop: None,
        }
    }
}

impl Default for AgroCastConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AgroCastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with AGROCAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("AGROCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AgroCastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "agrocast").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(
                AgroCastError::config("Weather API timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(AgroCastError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > 16 {
            return Err(
                AgroCastError::config("Forecast horizon must be between 1 and 16 days").into(),
            );
        }

        if self.cache.ttl_hours > 168 {
            return Err(AgroCastError::config("Cache TTL cannot exceed 168 hours (1 week)").into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AgroCastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for url in [
            &self.weather.forecast_url,
            &self.weather.geocoding_url,
            &self.weather.reverse_geocoding_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AgroCastError::config(
                    "Weather API base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        if !(-90.0..=90.0).contains(&self.defaults.latitude)
            || !(-180.0..=180.0).contains(&self.defaults.longitude)
        {
            return Err(AgroCastError::config("Default coordinates are out of range").into());
        }

        Ok(())
    }
}
