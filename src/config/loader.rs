//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings and the work-location catalogue from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkLocation;

use super::types::{LocationsConfig, PayrollSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml    # Display precision, draft policy, payslip branding
/// └── locations.yaml   # Work locations, statutory rates, compensation templates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let location = loader.location("riyadh_hq")?;
/// println!("{} pays in {}", location.name, location.currency);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PayrollSettings,
    locations: Vec<WorkLocation>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayrollSettings>(&path.join("settings.yaml"))?;
        let locations = Self::load_yaml::<LocationsConfig>(&path.join("locations.yaml"))?;

        tracing::debug!(
            path = %path.display(),
            locations = locations.locations.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            settings,
            locations: locations.locations,
        })
    }

    /// Builds a loader from values already in memory.
    pub fn from_parts(settings: PayrollSettings, locations: Vec<WorkLocation>) -> Self {
        Self {
            settings,
            locations,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns every configured work location.
    pub fn locations(&self) -> &[WorkLocation] {
        &self.locations
    }

    /// Gets a work location by id.
    pub fn location(&self, location_id: &str) -> EngineResult<&WorkLocation> {
        self.locations
            .iter()
            .find(|l| l.id == location_id)
            .ok_or_else(|| EngineError::LocationNotFound {
                location_id: location_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DraftConflict;
    use crate::models::{AmountBasis, PercentageBase};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().display_decimal_places, 2);
        assert_eq!(
            loader.settings().draft_conflict,
            DraftConflict::IdenticalPeriod
        );
        assert_eq!(loader.settings().payslip.company_name, "Nakheel Trading Co.");
        assert_eq!(loader.locations().len(), 2);
    }

    #[test]
    fn test_get_location() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let location = loader.location("riyadh_hq").unwrap();
        assert_eq!(location.currency, "SAR");
        assert!(location.statutory_enabled);
        assert_eq!(location.statutory_rate("SA").unwrap().employee_rate, dec("9.75"));

        let housing = location.template("housing").unwrap();
        assert_eq!(
            housing.basis,
            AmountBasis::Percentage {
                percentage: dec("25"),
                of: PercentageBase::BaseSalary,
            }
        );
    }

    #[test]
    fn test_get_location_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.location("unknown") {
            Err(EngineError::LocationNotFound { location_id }) => {
                assert_eq!(location_id, "unknown");
            }
            _ => panic!("Expected LocationNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_scheme_disabled_location() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let dubai = loader.location("dubai_branch").unwrap();
        assert_eq!(dubai.currency, "AED");
        assert!(!dubai.statutory_enabled);
    }
}
