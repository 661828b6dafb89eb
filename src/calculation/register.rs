//! Register assembly: snapshots plus adjustments into a reviewable register.

use crate::error::EngineResult;
use crate::models::{
    AuditWarning, PayrollRegister, PayrollRun, PayrollRunAdjustment, PayrollRunEmployee,
    RegisterLine,
};

use super::{compute_employee_totals, compute_run_totals, validate_register};

/// Builds the register for a run from its stored snapshots and adjustments.
///
/// Lines follow snapshot order. Adjustments whose employee is not in the
/// snapshot set are carried in the ledger but contribute to no line. Fails
/// with `AmountOverflow` when a line or run total leaves the `Decimal` range.
pub fn build_register(
    run: PayrollRun,
    snapshots: Vec<PayrollRunEmployee>,
    adjustments: Vec<PayrollRunAdjustment>,
) -> EngineResult<PayrollRegister> {
    let lines: Vec<RegisterLine> = snapshots
        .into_iter()
        .map(|snapshot| {
            let own: Vec<PayrollRunAdjustment> = adjustments
                .iter()
                .filter(|a| a.employee_id == snapshot.employee_id)
                .cloned()
                .collect();
            let totals = compute_employee_totals(&snapshot, &own)?;
            Ok(RegisterLine {
                snapshot,
                adjustments: own,
                totals,
            })
        })
        .collect::<EngineResult<_>>()?;

    let employee_totals: Vec<_> = lines.iter().map(|l| l.totals.clone()).collect();
    let totals = compute_run_totals(&employee_totals)?;
    let validation = validate_register(&lines);
    let warnings: Vec<AuditWarning> = lines
        .iter()
        .flat_map(|l| l.snapshot.warnings.iter().cloned())
        .collect();

    Ok(PayrollRegister {
        run,
        lines,
        totals,
        validation,
        warnings,
    })
}
