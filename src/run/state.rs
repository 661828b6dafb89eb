//! Payroll run state machine.
//!
//! ```text
//! draft ──finalize──▶ finalized ──issue payslips──▶ payslips_issued
//!   │
//!   └──delete──▶ (removed)
//! ```
//!
//! Every transition is one-way. Snapshotting and adjustment edits keep a run
//! in `draft` and are refused everywhere else.

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRun, RunAction, RunStatus};

impl RunStatus {
    /// Returns the status after `action`, or `None` if the action removes the run.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{RunAction, RunStatus};
    ///
    /// assert_eq!(
    ///     RunStatus::Draft.transition(RunAction::Finalize).unwrap(),
    ///     Some(RunStatus::Finalized)
    /// );
    /// assert!(RunStatus::Finalized.transition(RunAction::Delete).is_err());
    /// ```
    pub fn transition(self, action: RunAction) -> EngineResult<Option<RunStatus>> {
        match (self, action) {
            (RunStatus::Draft, RunAction::SnapshotEmployees | RunAction::EditAdjustments) => {
                Ok(Some(RunStatus::Draft))
            }
            (RunStatus::Draft, RunAction::Finalize) => Ok(Some(RunStatus::Finalized)),
            (RunStatus::Draft, RunAction::Delete) => Ok(None),
            (RunStatus::Finalized, RunAction::IssuePayslips) => Ok(Some(RunStatus::PayslipsIssued)),
            (current, attempted) => Err(EngineError::InvalidTransition { current, attempted }),
        }
    }
}

/// Fails with `RunNotEditable` unless the run is still a draft.
pub fn require_draft(run: &PayrollRun) -> EngineResult<()> {
    if run.is_draft() {
        Ok(())
    } else {
        Err(EngineError::RunNotEditable {
            run_id: run.id,
            status: run.status,
        })
    }
}
