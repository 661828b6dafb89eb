//! Persistence for payroll runs, snapshots and adjustments.
//!
//! The store is the guard for the "one active draft per location and period"
//! invariant: [`PayrollStore::insert_draft`] must check and insert atomically,
//! the way a uniqueness constraint on `(location, period, status = draft)`
//! would in a database. Run updates are compare-and-swap on the revision.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::DraftConflict;
use crate::error::EngineResult;
use crate::models::{PayPeriod, PayrollRun, PayrollRunAdjustment, PayrollRunEmployee};

/// Storage operations required by the payroll run lifecycle.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Inserts a new draft unless a conflicting draft exists.
    ///
    /// Fails with `DuplicateDraft` naming the existing draft.
    async fn insert_draft(&self, run: &PayrollRun, conflict: DraftConflict) -> EngineResult<()>;

    /// Gets a run by id.
    async fn get_run(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>>;

    /// Finds the draft that would conflict with a new run for the location and period.
    async fn find_draft(
        &self,
        location_id: &str,
        pay_period: &PayPeriod,
        conflict: DraftConflict,
    ) -> EngineResult<Option<PayrollRun>>;

    /// Lists runs, newest first, optionally filtered by location.
    async fn list_runs(&self, location_id: Option<&str>) -> EngineResult<Vec<PayrollRun>>;

    /// Replaces a stored run if its stored revision equals `expected_revision`.
    ///
    /// Fails with `RunNotFound` or `StaleRun`.
    async fn update_run(&self, run: &PayrollRun, expected_revision: u64) -> EngineResult<()>;

    /// Deletes a draft run together with its snapshots and adjustments.
    ///
    /// The stored run must still be a draft at `expected_revision`. Fails with
    /// `RunNotFound`, `StaleRun`, or `InvalidTransition` for a run that left
    /// the draft state.
    async fn delete_run(&self, run_id: Uuid, expected_revision: u64) -> EngineResult<()>;

    /// Replaces the whole snapshot set of a run.
    async fn replace_snapshots(
        &self,
        run_id: Uuid,
        snapshots: Vec<PayrollRunEmployee>,
    ) -> EngineResult<()>;

    /// Lists a run's snapshots in selection order.
    async fn list_snapshots(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunEmployee>>;

    /// Stores a new adjustment.
    async fn insert_adjustment(&self, adjustment: &PayrollRunAdjustment) -> EngineResult<()>;

    /// Gets an adjustment by id.
    async fn get_adjustment(&self, adjustment_id: Uuid)
    -> EngineResult<Option<PayrollRunAdjustment>>;

    /// Deletes an adjustment. Fails with `AdjustmentNotFound`.
    async fn delete_adjustment(&self, adjustment_id: Uuid) -> EngineResult<()>;

    /// Lists a run's adjustments in insertion order.
    async fn list_adjustments(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunAdjustment>>;
}

/// Returns true if an existing draft blocks a new one under the given policy.
pub fn draft_conflicts(
    existing: &PayrollRun,
    location_id: &str,
    pay_period: &PayPeriod,
    conflict: DraftConflict,
) -> bool {
    if !existing.is_draft() || existing.location_id != location_id {
        return false;
    }
    match conflict {
        DraftConflict::IdenticalPeriod => existing.pay_period == *pay_period,
        DraftConflict::OverlappingPeriod => existing.pay_period.overlaps(pay_period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunStatus;
    use chrono::NaiveDate;

    fn period(start: (i32, u32, u32), end: (i32, u32, u32)) -> PayPeriod {
        PayPeriod::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_identical_period_conflicts() {
        let january = period((2026, 1, 1), (2026, 1, 31));
        let draft = PayrollRun::new_draft("riyadh_hq", "SAR", january, "hr.admin");

        assert!(draft_conflicts(
            &draft,
            "riyadh_hq",
            &january,
            DraftConflict::IdenticalPeriod
        ));
        assert!(!draft_conflicts(
            &draft,
            "dubai_branch",
            &january,
            DraftConflict::IdenticalPeriod
        ));
    }

    #[test]
    fn test_overlap_only_conflicts_under_overlap_policy() {
        let draft = PayrollRun::new_draft(
            "riyadh_hq",
            "SAR",
            period((2026, 1, 1), (2026, 1, 31)),
            "hr.admin",
        );
        let shifted = period((2026, 1, 15), (2026, 2, 14));

        assert!(!draft_conflicts(
            &draft,
            "riyadh_hq",
            &shifted,
            DraftConflict::IdenticalPeriod
        ));
        assert!(draft_conflicts(
            &draft,
            "riyadh_hq",
            &shifted,
            DraftConflict::OverlappingPeriod
        ));
    }

    #[test]
    fn test_finalized_runs_never_conflict() {
        let january = period((2026, 1, 1), (2026, 1, 31));
        let mut run = PayrollRun::new_draft("riyadh_hq", "SAR", january, "hr.admin");
        run.status = RunStatus::Finalized;

        assert!(!draft_conflicts(
            &run,
            "riyadh_hq",
            &january,
            DraftConflict::OverlappingPeriod
        ));
    }
}
