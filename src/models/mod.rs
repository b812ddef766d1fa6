//! Data models for the AgroCast application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display metadata
//! - Snapshot: One immutable multi-horizon weather observation

pub mod location;
pub mod snapshot;

// Re-export all public types for convenient access
pub use location::Location;
pub use snapshot::{CurrentConditions, DailySample, HourlySample, WeatherSnapshot};
