//! Flat register rows for the reporting/export surface.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{PayrollRegister, RunStatus};

use super::round_for_display;

/// One employee's register figures as a flat, typed row.
///
/// Amounts are rounded to the display precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRow {
    /// The run.
    pub run_id: Uuid,
    /// The run's status when exported.
    pub run_status: RunStatus,
    /// The work location.
    pub location_id: String,
    /// First day of the pay period.
    pub period_start: NaiveDate,
    /// Last day of the pay period.
    pub period_end: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Department, empty when unset.
    pub department: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// Sum of recurring allowances.
    pub allowances: Decimal,
    /// Sum of recurring deductions, excluding statutory.
    pub deductions: Decimal,
    /// Employee statutory contribution.
    pub statutory_employee: Decimal,
    /// Employer statutory contribution.
    pub statutory_employer: Decimal,
    /// Sum of earning adjustments.
    pub earnings_adjustments: Decimal,
    /// Sum of deduction adjustments.
    pub deduction_adjustments: Decimal,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

/// Flattens a register into export rows.
pub fn register_rows(register: &PayrollRegister, places: u32) -> EngineResult<Vec<RegisterRow>> {
    let run = &register.run;
    let round = |amount: Decimal| round_for_display(amount, places);

    register
        .lines
        .iter()
        .map(|line| {
            let snapshot = &line.snapshot;
            let totals = &line.totals;
            Ok(RegisterRow {
                run_id: run.id,
                run_status: run.status,
                location_id: run.location_id.clone(),
                period_start: run.pay_period.start_date,
                period_end: run.pay_period.end_date,
                currency: run.currency.clone(),
                employee_id: snapshot.employee_id.clone(),
                employee_name: snapshot.employee_name.clone(),
                department: snapshot.department.clone().unwrap_or_default(),
                base_salary: round(snapshot.base_salary),
                allowances: round(snapshot.allowances_total()?),
                deductions: round(snapshot.deductions_total()?),
                statutory_employee: round(snapshot.statutory.employee_amount),
                statutory_employer: round(snapshot.statutory.employer_amount),
                earnings_adjustments: round(totals.earnings_adjustment),
                deduction_adjustments: round(totals.deductions_adjustment),
                gross_pay: round(totals.gross_pay),
                total_deductions: round(totals.total_deductions),
                net_pay: round(totals.net_pay),
            })
        })
        .collect()
}
