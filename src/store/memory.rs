//! In-memory store.
//!
//! All state sits behind one `RwLock`, so a draft's uniqueness check and its
//! insert happen under the same write guard.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PayrollStore, draft_conflicts};
use crate::config::DraftConflict;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollRun, PayrollRunAdjustment, PayrollRunEmployee, RunAction};

#[derive(Debug, Default)]
struct StoreState {
    runs: HashMap<Uuid, PayrollRun>,
    snapshots: HashMap<Uuid, Vec<PayrollRunEmployee>>,
    adjustments: HashMap<Uuid, Vec<PayrollRunAdjustment>>,
    // adjustment id -> run id
    adjustment_index: HashMap<Uuid, Uuid>,
}

/// Thread-safe in-memory implementation of [`PayrollStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn insert_draft(&self, run: &PayrollRun, conflict: DraftConflict) -> EngineResult<()> {
        let mut state = self.state.write().await;

        if let Some(existing) = state
            .runs
            .values()
            .find(|r| draft_conflicts(r, &run.location_id, &run.pay_period, conflict))
        {
            return Err(EngineError::DuplicateDraft {
                location_id: run.location_id.clone(),
                pay_period: run.pay_period,
                existing_run_id: existing.id,
            });
        }

        state.runs.insert(run.id, run.clone());
        Ok(())
    }

    async fn get_run(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>> {
        let state = self.state.read().await;
        Ok(state.runs.get(&run_id).cloned())
    }

    async fn find_draft(
        &self,
        location_id: &str,
        pay_period: &PayPeriod,
        conflict: DraftConflict,
    ) -> EngineResult<Option<PayrollRun>> {
        let state = self.state.read().await;
        Ok(state
            .runs
            .values()
            .find(|r| draft_conflicts(r, location_id, pay_period, conflict))
            .cloned())
    }

    async fn list_runs(&self, location_id: Option<&str>) -> EngineResult<Vec<PayrollRun>> {
        let state = self.state.read().await;
        let mut runs: Vec<PayrollRun> = state
            .runs
            .values()
            .filter(|r| location_id.is_none_or(|id| r.location_id == id))
            .cloned()
            .collect();
        runs.sort_by(|a, b| {
            b.pay_period
                .start_date
                .cmp(&a.pay_period.start_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(runs)
    }

    async fn update_run(&self, run: &PayrollRun, expected_revision: u64) -> EngineResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .runs
            .get_mut(&run.id)
            .ok_or(EngineError::RunNotFound { run_id: run.id })?;

        if stored.revision != expected_revision {
            return Err(EngineError::StaleRun {
                run_id: run.id,
                expected: expected_revision,
                actual: stored.revision,
            });
        }

        *stored = run.clone();
        Ok(())
    }

    async fn delete_run(&self, run_id: Uuid, expected_revision: u64) -> EngineResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .runs
            .get(&run_id)
            .ok_or(EngineError::RunNotFound { run_id })?;

        if stored.revision != expected_revision {
            return Err(EngineError::StaleRun {
                run_id,
                expected: expected_revision,
                actual: stored.revision,
            });
        }
        stored.status.transition(RunAction::Delete)?;

        state.runs.remove(&run_id);
        state.snapshots.remove(&run_id);
        if let Some(adjustments) = state.adjustments.remove(&run_id) {
            for adjustment in adjustments {
                state.adjustment_index.remove(&adjustment.id);
            }
        }
        Ok(())
    }

    async fn replace_snapshots(
        &self,
        run_id: Uuid,
        snapshots: Vec<PayrollRunEmployee>,
    ) -> EngineResult<()> {
        let mut state = self.state.write().await;
        if !state.runs.contains_key(&run_id) {
            return Err(EngineError::RunNotFound { run_id });
        }
        state.snapshots.insert(run_id, snapshots);
        Ok(())
    }

    async fn list_snapshots(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunEmployee>> {
        let state = self.state.read().await;
        Ok(state.snapshots.get(&run_id).cloned().unwrap_or_default())
    }

    async fn insert_adjustment(&self, adjustment: &PayrollRunAdjustment) -> EngineResult<()> {
        let mut state = self.state.write().await;
        if !state.runs.contains_key(&adjustment.run_id) {
            return Err(EngineError::RunNotFound {
                run_id: adjustment.run_id,
            });
        }
        state
            .adjustments
            .entry(adjustment.run_id)
            .or_default()
            .push(adjustment.clone());
        state
            .adjustment_index
            .insert(adjustment.id, adjustment.run_id);
        Ok(())
    }

    async fn get_adjustment(
        &self,
        adjustment_id: Uuid,
    ) -> EngineResult<Option<PayrollRunAdjustment>> {
        let state = self.state.read().await;
        let Some(run_id) = state.adjustment_index.get(&adjustment_id) else {
            return Ok(None);
        };
        Ok(state
            .adjustments
            .get(run_id)
            .and_then(|list| list.iter().find(|a| a.id == adjustment_id))
            .cloned())
    }

    async fn delete_adjustment(&self, adjustment_id: Uuid) -> EngineResult<()> {
        let mut state = self.state.write().await;
        let run_id = state
            .adjustment_index
            .remove(&adjustment_id)
            .ok_or(EngineError::AdjustmentNotFound { adjustment_id })?;
        if let Some(list) = state.adjustments.get_mut(&run_id) {
            list.retain(|a| a.id != adjustment_id);
        }
        Ok(())
    }

    async fn list_adjustments(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunAdjustment>> {
        let state = self.state.read().await;
        Ok(state.adjustments.get(&run_id).cloned().unwrap_or_default())
    }
}
