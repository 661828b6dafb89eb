//! Frozen per-employee compensation snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AuditWarning, CompensationLineItem, Employee, ResolvedCompensation, StatutoryContribution,
    line_items_total,
};
use crate::calculation::{checked_add, checked_sub};
use crate::error::EngineResult;

/// A point-in-time copy of an employee's resolved compensation inside a run.
///
/// Snapshots are values, not references: later edits to the employee's master
/// data never reach an existing snapshot. Only re-snapshotting the run does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunEmployee {
    /// The owning run.
    pub run_id: Uuid,
    /// The employee.
    pub employee_id: String,
    /// Display name at snapshot time.
    pub employee_name: String,
    /// Department at snapshot time.
    pub department: Option<String>,
    /// Currency of every amount below.
    pub currency: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// Resolved allowances.
    pub allowance_items: Vec<CompensationLineItem>,
    /// Resolved deductions, excluding the statutory contribution.
    pub deduction_items: Vec<CompensationLineItem>,
    /// Statutory contribution breakdown.
    pub statutory: StatutoryContribution,
    /// Base salary plus allowances.
    pub gross_pay: Decimal,
    /// Deductions plus the employee statutory contribution.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Warnings raised while resolving.
    pub warnings: Vec<AuditWarning>,
    /// When the snapshot was taken.
    pub snapshotted_at: DateTime<Utc>,
}

impl PayrollRunEmployee {
    /// Copies an employee's resolved compensation into a run.
    ///
    /// Fails with `AmountOverflow` when the snapshot figures are out of range.
    pub fn capture(
        run_id: Uuid,
        employee: &Employee,
        resolved: ResolvedCompensation,
        snapshotted_at: DateTime<Utc>,
    ) -> EngineResult<Self> {
        let gross_pay = checked_add(
            resolved.base_salary,
            line_items_total(&resolved.allowance_items)?,
            "gross pay",
        )?;
        let total_deductions = checked_add(
            line_items_total(&resolved.deduction_items)?,
            resolved.statutory.employee_amount,
            "total deductions",
        )?;
        let net_pay = checked_sub(gross_pay, total_deductions, "net pay")?;

        Ok(Self {
            run_id,
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            department: employee.department.clone(),
            currency: resolved.currency,
            base_salary: resolved.base_salary,
            allowance_items: resolved.allowance_items,
            deduction_items: resolved.deduction_items,
            statutory: resolved.statutory,
            gross_pay,
            total_deductions,
            net_pay,
            warnings: resolved.warnings,
            snapshotted_at,
        })
    }

    /// Sum of the allowance items.
    pub fn allowances_total(&self) -> EngineResult<Decimal> {
        line_items_total(&self.allowance_items)
    }

    /// Sum of the deduction items, excluding the statutory contribution.
    pub fn deductions_total(&self) -> EngineResult<Decimal> {
        line_items_total(&self.deduction_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AmountBasis, CompensationAssignment, LineItemKind, LineItemSource, StatutoryStatus,
    };

    fn employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Sara Ali".to_string(),
            department: Some("Finance".to_string()),
            work_location_id: "riyadh_hq".to_string(),
            base_salary: Decimal::from(1000),
            nationality: "SA".to_string(),
            subject_to_statutory_contribution: true,
            statutory_registered_salary: None,
            compensation: CompensationAssignment::default(),
            active: true,
        }
    }

    fn fixed(kind: LineItemKind, name: &str, amount: i64) -> CompensationLineItem {
        CompensationLineItem {
            kind,
            name: name.to_string(),
            source: LineItemSource::Custom,
            basis: AmountBasis::Fixed {
                amount: Decimal::from(amount),
            },
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn test_capture_computes_snapshot_totals() {
        let resolved = ResolvedCompensation {
            employee_id: "emp_001".to_string(),
            currency: "SAR".to_string(),
            base_salary: Decimal::from(1000),
            allowance_items: vec![fixed(LineItemKind::Allowance, "Transport", 200)],
            deduction_items: vec![fixed(LineItemKind::Deduction, "Loan", 30)],
            statutory: StatutoryContribution {
                status: StatutoryStatus::Applied,
                contribution_base: Decimal::from(1200),
                employee_rate: Some(Decimal::from(5)),
                employer_rate: Some(Decimal::from(10)),
                employee_amount: Decimal::from(60),
                employer_amount: Decimal::from(120),
            },
            warnings: vec![],
            audit_steps: vec![],
        };

        let snapshot =
            PayrollRunEmployee::capture(Uuid::nil(), &employee(), resolved, Utc::now()).unwrap();

        assert_eq!(snapshot.gross_pay, Decimal::from(1200));
        assert_eq!(snapshot.total_deductions, Decimal::from(90));
        assert_eq!(snapshot.net_pay, Decimal::from(1110));
        assert_eq!(snapshot.allowances_total().unwrap(), Decimal::from(200));
        assert_eq!(snapshot.deductions_total().unwrap(), Decimal::from(30));
        assert_eq!(snapshot.department.as_deref(), Some("Finance"));
    }

    #[test]
    fn test_capture_rejects_out_of_range_gross_pay() {
        let resolved = ResolvedCompensation {
            employee_id: "emp_001".to_string(),
            currency: "SAR".to_string(),
            base_salary: Decimal::MAX,
            allowance_items: vec![fixed(LineItemKind::Allowance, "Transport", 200)],
            deduction_items: vec![],
            statutory: StatutoryContribution::none(StatutoryStatus::NotSubject),
            warnings: vec![],
            audit_steps: vec![],
        };

        let result = PayrollRunEmployee::capture(Uuid::nil(), &employee(), resolved, Utc::now());

        assert!(matches!(
            result,
            Err(crate::error::EngineError::AmountOverflow { ref context }) if context == "gross pay"
        ));
    }
}
