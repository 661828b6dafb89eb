//! Per-employee and run-level totals.
//!
//! Adjustments are merged into snapshot figures here, at calculation time;
//! they are never stored pre-merged. All accumulation is full-precision,
//! overflow-checked `Decimal` arithmetic. Rounding happens only for display
//! and export.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AdjustmentType, EmployeeTotals, PayrollRunAdjustment, PayrollRunEmployee, RunTotals,
};

use super::money::{checked_add, checked_sub};

/// Folds an employee's adjustments into their snapshot figures.
///
/// Adjustments for other employees are ignored. Adjustment magnitudes are
/// unbounded, so a total that leaves the `Decimal` range fails with
/// `AmountOverflow`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_employee_totals;
/// # use payroll_engine::models::*;
/// # use chrono::Utc;
/// # use rust_decimal::Decimal;
/// # use uuid::Uuid;
/// # let snapshot = PayrollRunEmployee {
/// #     run_id: Uuid::nil(),
/// #     employee_id: "emp_001".to_string(),
/// #     employee_name: "Sara Ali".to_string(),
/// #     department: None,
/// #     currency: "SAR".to_string(),
/// #     base_salary: Decimal::from(1000),
/// #     allowance_items: vec![],
/// #     deduction_items: vec![],
/// #     statutory: StatutoryContribution::none(StatutoryStatus::NotSubject),
/// #     gross_pay: Decimal::from(1200),
/// #     total_deductions: Decimal::from(70),
/// #     net_pay: Decimal::from(1130),
/// #     warnings: vec![],
/// #     snapshotted_at: Utc::now(),
/// # };
/// let bonus = PayrollRunAdjustment::from_request(
///     Uuid::nil(),
///     NewAdjustment {
///         employee_id: "emp_001".to_string(),
///         adjustment_type: AdjustmentType::Earning,
///         name: "Bonus".to_string(),
///         amount: Decimal::from(50),
///         note: None,
///     },
/// );
///
/// let totals = compute_employee_totals(&snapshot, &[bonus]).unwrap();
/// assert_eq!(totals.gross_pay, Decimal::from(1250));
/// assert_eq!(totals.total_deductions, Decimal::from(70));
/// assert_eq!(totals.net_pay, Decimal::from(1180));
/// ```
pub fn compute_employee_totals(
    snapshot: &PayrollRunEmployee,
    adjustments: &[PayrollRunAdjustment],
) -> EngineResult<EmployeeTotals> {
    let mut earnings_adjustment = Decimal::ZERO;
    let mut deductions_adjustment = Decimal::ZERO;

    for adjustment in adjustments
        .iter()
        .filter(|a| a.employee_id == snapshot.employee_id)
    {
        match adjustment.adjustment_type {
            AdjustmentType::Earning => {
                earnings_adjustment =
                    checked_add(earnings_adjustment, adjustment.amount, "earning adjustments")?;
            }
            AdjustmentType::Deduction => {
                deductions_adjustment =
                    checked_add(deductions_adjustment, adjustment.amount, "deduction adjustments")?;
            }
        }
    }

    let gross_pay = checked_add(snapshot.gross_pay, earnings_adjustment, "gross pay")?;
    let total_deductions = checked_add(
        snapshot.total_deductions,
        deductions_adjustment,
        "total deductions",
    )?;

    Ok(EmployeeTotals {
        employee_id: snapshot.employee_id.clone(),
        earnings_adjustment,
        deductions_adjustment,
        gross_pay,
        total_deductions,
        net_pay: checked_sub(gross_pay, total_deductions, "net pay")?,
    })
}

/// Sums employee totals into run totals.
pub fn compute_run_totals(employee_totals: &[EmployeeTotals]) -> EngineResult<RunTotals> {
    employee_totals.iter().try_fold(
        RunTotals {
            total_gross: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net: Decimal::ZERO,
            employee_count: 0,
        },
        |acc, totals| -> EngineResult<RunTotals> {
            Ok(RunTotals {
                total_gross: checked_add(acc.total_gross, totals.gross_pay, "run gross")?,
                total_deductions: checked_add(
                    acc.total_deductions,
                    totals.total_deductions,
                    "run deductions",
                )?,
                total_net: checked_add(acc.total_net, totals.net_pay, "run net")?,
                employee_count: acc.employee_count + 1,
            })
        },
    )
}
