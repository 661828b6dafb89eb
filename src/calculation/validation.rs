//! Pre-finalize validation pass.
//!
//! Exactly three checks: an empty run and negative net pay block finalize,
//! zero base salary is a warning.

use rust_decimal::Decimal;

use crate::models::{RegisterLine, Severity, ValidationCode, ValidationIssue, ValidationReport};

/// Validates a computed register.
pub fn validate_register(lines: &[RegisterLine]) -> ValidationReport {
    let mut issues = Vec::new();

    if lines.is_empty() {
        issues.push(ValidationIssue {
            code: ValidationCode::NoEmployees,
            severity: Severity::Error,
            employee_id: None,
            employee_name: None,
            message: "Payroll run has no employees".to_string(),
        });
    }

    for line in lines {
        let snapshot = &line.snapshot;

        if line.totals.net_pay < Decimal::ZERO {
            issues.push(ValidationIssue {
                code: ValidationCode::NegativeNetPay,
                severity: Severity::Error,
                employee_id: Some(snapshot.employee_id.clone()),
                employee_name: Some(snapshot.employee_name.clone()),
                message: format!(
                    "Net pay for {} is negative ({})",
                    snapshot.employee_name, line.totals.net_pay
                ),
            });
        }

        if snapshot.base_salary.is_zero() {
            issues.push(ValidationIssue {
                code: ValidationCode::ZeroBaseSalary,
                severity: Severity::Warning,
                employee_id: Some(snapshot.employee_id.clone()),
                employee_name: Some(snapshot.employee_name.clone()),
                message: format!("Base salary for {} is zero", snapshot.employee_name),
            });
        }
    }

    ValidationReport { issues }
}
