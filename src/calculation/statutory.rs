//! Statutory social-insurance contribution calculation.
//!
//! The contribution base is the employee's base salary plus resolved
//! allowances. Rates are looked up by exact nationality code in the work
//! location's table. A missing rate yields a zero contribution with a warning.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, Employee, StatutoryContribution, StatutoryStatus, WorkLocation,
};

use super::money::{checked_add, percentage_of};

/// Warning code raised when a nationality has no configured rate.
pub const NO_STATUTORY_RATE_WARNING: &str = "NO_STATUTORY_RATE";

/// The result of the statutory calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct StatutoryContributionResult {
    /// The resolved contribution.
    pub contribution: StatutoryContribution,
    /// Present when the nationality has no configured rate.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates an employee's statutory contribution.
///
/// Only computed when the employee is subject to the scheme AND the location
/// has the scheme enabled. Fails with `AmountOverflow` when the contribution
/// base or either share is out of range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_statutory_contribution;
/// use payroll_engine::models::{
///     CompensationAssignment, Employee, StatutoryRate, StatutoryStatus, WorkLocation,
/// };
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut rates = BTreeMap::new();
/// rates.insert(
///     "SA".to_string(),
///     StatutoryRate { employee_rate: Decimal::from(10), employer_rate: Decimal::from(12) },
/// );
/// let location = WorkLocation {
///     id: "riyadh_hq".to_string(),
///     name: "Riyadh HQ".to_string(),
///     currency: "SAR".to_string(),
///     statutory_enabled: true,
///     statutory_rates: rates,
///     templates: vec![],
/// };
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Sara Ali".to_string(),
///     department: None,
///     work_location_id: "riyadh_hq".to_string(),
///     base_salary: Decimal::from(5000),
///     nationality: "SA".to_string(),
///     subject_to_statutory_contribution: true,
///     statutory_registered_salary: None,
///     compensation: CompensationAssignment::default(),
///     active: true,
/// };
///
/// let result =
///     calculate_statutory_contribution(&employee, &location, Decimal::from(1000), 1).unwrap();
/// assert_eq!(result.contribution.status, StatutoryStatus::Applied);
/// assert_eq!(result.contribution.employee_amount, Decimal::from(600));
/// assert_eq!(result.contribution.employer_amount, Decimal::from(720));
/// ```
pub fn calculate_statutory_contribution(
    employee: &Employee,
    location: &WorkLocation,
    allowances_total: Decimal,
    step_number: u32,
) -> EngineResult<StatutoryContributionResult> {
    let input = serde_json::json!({
        "employee_id": employee.id,
        "subject_to_statutory_contribution": employee.subject_to_statutory_contribution,
        "location_id": location.id,
        "scheme_enabled": location.statutory_enabled,
        "nationality": employee.nationality,
        "base_salary": employee.base_salary.normalize().to_string(),
        "allowances_total": allowances_total.normalize().to_string()
    });

    if !employee.subject_to_statutory_contribution {
        return Ok(skipped(
            StatutoryStatus::NotSubject,
            step_number,
            input,
            "Employee is not subject to statutory contribution".to_string(),
        ));
    }

    if !location.statutory_enabled {
        return Ok(skipped(
            StatutoryStatus::SchemeDisabled,
            step_number,
            input,
            format!(
                "Statutory contribution scheme is disabled at location '{}'",
                location.id
            ),
        ));
    }

    let Some(rate) = location.statutory_rate(&employee.nationality) else {
        let warning = AuditWarning {
            code: NO_STATUTORY_RATE_WARNING.to_string(),
            message: format!(
                "No statutory rate configured for nationality '{}' at location '{}'; employee '{}' contributes 0",
                employee.nationality, location.id, employee.id
            ),
            severity: "medium".to_string(),
        };
        let mut result = skipped(
            StatutoryStatus::NoRateConfigured,
            step_number,
            input,
            warning.message.clone(),
        );
        result.warning = Some(warning);
        return Ok(result);
    };

    let contribution_base = checked_add(
        employee.base_salary,
        allowances_total,
        "statutory contribution base",
    )?;
    let employee_amount = percentage_of(
        contribution_base,
        rate.employee_rate,
        "employee statutory contribution",
    )?;
    let employer_amount = percentage_of(
        contribution_base,
        rate.employer_rate,
        "employer statutory contribution",
    )?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contribution".to_string(),
        rule_name: "Statutory Contribution".to_string(),
        input,
        output: serde_json::json!({
            "status": "applied",
            "contribution_base": contribution_base.normalize().to_string(),
            "employee_rate": rate.employee_rate.normalize().to_string(),
            "employer_rate": rate.employer_rate.normalize().to_string(),
            "employee_amount": employee_amount.normalize().to_string(),
            "employer_amount": employer_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{currency} {} × {}% = {currency} {} (employer {}% = {currency} {})",
            contribution_base.normalize(),
            rate.employee_rate.normalize(),
            employee_amount.normalize(),
            rate.employer_rate.normalize(),
            employer_amount.normalize(),
            currency = location.currency
        ),
    };

    Ok(StatutoryContributionResult {
        contribution: StatutoryContribution {
            status: StatutoryStatus::Applied,
            contribution_base,
            employee_rate: Some(rate.employee_rate),
            employer_rate: Some(rate.employer_rate),
            employee_amount,
            employer_amount,
        },
        warning: None,
        audit_step,
    })
}

fn skipped(
    status: StatutoryStatus,
    step_number: u32,
    input: serde_json::Value,
    reasoning: String,
) -> StatutoryContributionResult {
    let contribution = StatutoryContribution::none(status);
    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contribution".to_string(),
        rule_name: "Statutory Contribution".to_string(),
        input,
        output: serde_json::json!({
            "status": status,
            "employee_amount": "0",
            "employer_amount": "0"
        }),
        reasoning,
    };

    StatutoryContributionResult {
        contribution,
        warning: None,
        audit_step,
    }
}
