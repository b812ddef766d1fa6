//! Weather-driven agronomic advisory engine
//!
//! This module turns one immutable weather snapshot into structured farming
//! guidance:
//! - Weather-code classification (descriptions, icons, sky themes)
//! - A generic farming tip for callers with no crop selected
//! - Spray safety with candidate calm windows
//! - Irrigation need from estimated evapotranspiration
//! - Fungal and insect risk scores
//! - Crop-specific precautions from static rule tables
//! - A ranking of the best working hours of the day
//!
//! Every function here is pure and synchronous: same snapshot in, same
//! advisory out, no I/O and no shared state. Callers may fan out across all
//! of them freely.

pub mod code;
pub mod crops;
pub mod irrigation;
pub mod pest;
pub mod spray;
pub mod tip;
pub mod work_hours;

// Re-export commonly used types from submodules
pub use code::{IconKind, SkyTheme};
pub use crops::{CropPrecaution, CropProfile, Severity, CROP_CATALOG};
pub use irrigation::IrrigationNeed;
pub use pest::PestRisk;
pub use spray::SprayAdvisory;
pub use tip::{FarmingTip, TipTone};
pub use work_hours::WorkWindow;
