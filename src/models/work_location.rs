//! Work location model: currency, statutory scheme and compensation templates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompensationTemplate;

/// Statutory contribution rates for one nationality, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRate {
    /// Share deducted from the employee's pay (e.g. `9.75` for 9.75%).
    pub employee_rate: Decimal,
    /// Share paid by the employer on top of pay.
    pub employer_rate: Decimal,
}

/// A work location as consumed by payroll. Immutable for the life of a run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkLocation;
///
/// let yaml = r#"
/// id: riyadh_hq
/// name: Riyadh HQ
/// currency: SAR
/// statutory_enabled: true
/// statutory_rates:
///   SA: { employee_rate: "9.75", employer_rate: "11.75" }
/// "#;
/// let location: WorkLocation = serde_yaml::from_str(yaml).unwrap();
/// assert!(location.statutory_rate("SA").is_some());
/// assert!(location.statutory_rate("IN").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLocation {
    /// Unique identifier for the location.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO currency code all payroll amounts are expressed in.
    pub currency: String,
    /// Whether the statutory contribution scheme applies at this location.
    #[serde(default)]
    pub statutory_enabled: bool,
    /// Nationality code to contribution rate pair.
    #[serde(default)]
    pub statutory_rates: BTreeMap<String, StatutoryRate>,
    /// Allowance and deduction templates offered at this location.
    #[serde(default)]
    pub templates: Vec<CompensationTemplate>,
}

impl WorkLocation {
    /// Looks up the rate pair by exact nationality code.
    pub fn statutory_rate(&self, nationality: &str) -> Option<&StatutoryRate> {
        self.statutory_rates.get(nationality)
    }

    /// Looks up a compensation template by id.
    pub fn template(&self, template_id: &str) -> Option<&CompensationTemplate> {
        self.templates.iter().find(|t| t.id == template_id)
    }
}
