//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine settings and the work-location catalogue
//! (currencies, statutory rate tables, compensation templates) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Display precision: {}", config.settings().display_decimal_places);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DraftConflict, LocationsConfig, PayrollSettings, PayslipSettings};
