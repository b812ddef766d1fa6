//! `AgroCast` - Weather-driven farm advisory engine
//!
//! This library turns multi-horizon weather forecasts into structured,
//! actionable farming guidance: spray safety, irrigation need, pest and
//! disease risk, crop-specific precautions and working-hour rankings.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod weather;

// Re-export core types for public API
pub use advisory::{
    CropPrecaution, CropProfile, FarmingTip, IrrigationNeed, PestRisk, Severity, SprayAdvisory,
    WorkWindow, CROP_CATALOG,
};
pub use config::AgroCastConfig;
pub use error::AgroCastError;
pub use models::{CurrentConditions, DailySample, HourlySample, Location, WeatherSnapshot};
pub use weather::{ForecastProvider, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AgroCastError>;
