//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::WorkLocation;

fn default_display_decimal_places() -> u32 {
    2
}

/// Which existing drafts block the creation of a new draft at the same location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftConflict {
    /// Only a draft with the identical pay period conflicts.
    #[default]
    IdenticalPeriod,
    /// Any draft whose pay period overlaps conflicts.
    OverlappingPeriod,
}

/// Payslip presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSettings {
    /// Company name printed on payslips.
    #[serde(default)]
    pub company_name: String,
    /// Whether payslips are emailed when the caller does not say.
    #[serde(default)]
    pub default_send_email: bool,
}

/// Engine-wide settings from `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Decimal places used when displaying and exporting amounts.
    #[serde(default = "default_display_decimal_places")]
    pub display_decimal_places: u32,
    /// Draft uniqueness policy.
    #[serde(default)]
    pub draft_conflict: DraftConflict,
    /// Payslip presentation.
    #[serde(default)]
    pub payslip: PayslipSettings,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            display_decimal_places: default_display_decimal_places(),
            draft_conflict: DraftConflict::default(),
            payslip: PayslipSettings::default(),
        }
    }
}

/// Work locations configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsConfig {
    /// All configured work locations.
    pub locations: Vec<WorkLocation>,
}
