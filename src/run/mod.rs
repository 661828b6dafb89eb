//! Payroll run lifecycle: the state machine, the adjustment ledger, and the
//! service that ties them to storage, the employee directory and the payslip
//! issuer.

mod ledger;
mod service;
mod state;

pub use ledger::AdjustmentLedger;
pub use service::PayrollRunService;
pub use state::require_draft;
