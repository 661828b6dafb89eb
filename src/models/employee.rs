//! Employee model as consumed by payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CompensationAssignment;

fn default_active() -> bool {
    true
}

/// Represents an employee as the payroll engine sees them.
///
/// Master data is owned by the employee directory; payroll only reads it at
/// snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department, for display only.
    #[serde(default)]
    pub department: Option<String>,
    /// The work location the employee is paid under.
    pub work_location_id: String,
    /// Monthly base salary in the location's currency.
    pub base_salary: Decimal,
    /// Nationality code used to look up statutory contribution rates.
    #[serde(default)]
    pub nationality: String,
    /// Whether the employee participates in the statutory contribution scheme.
    #[serde(default)]
    pub subject_to_statutory_contribution: bool,
    /// Salary registered with the statutory scheme; may differ from base salary.
    #[serde(default)]
    pub statutory_registered_salary: Option<Decimal>,
    /// Recurring allowances and deductions.
    #[serde(default)]
    pub compensation: CompensationAssignment,
    /// Inactive employees are never offered for selection.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Employee {
    /// Returns the statutory registered salary, or zero when it was never set.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{CompensationAssignment, Employee};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Sara Ali".to_string(),
    ///     department: None,
    ///     work_location_id: "riyadh_hq".to_string(),
    ///     base_salary: Decimal::from(8000),
    ///     nationality: "SA".to_string(),
    ///     subject_to_statutory_contribution: true,
    ///     statutory_registered_salary: None,
    ///     compensation: CompensationAssignment::default(),
    ///     active: true,
    /// };
    /// assert_eq!(employee.registered_salary_or_zero(), Decimal::ZERO);
    /// ```
    pub fn registered_salary_or_zero(&self) -> Decimal {
        self.statutory_registered_salary.unwrap_or(Decimal::ZERO)
    }
}
