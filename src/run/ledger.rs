//! Run-scoped adjustment ledger.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::build_register;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewAdjustment, PayrollRun, PayrollRunAdjustment, RunAction};
use crate::store::PayrollStore;

use super::state::require_draft;

/// Records one-time earnings and deductions against draft runs.
///
/// Adjustments are stored apart from the snapshots and merged only when
/// totals are computed. Every edit bumps the run's revision first, so an edit
/// racing a finalize loses with `StaleRun` instead of landing in a locked run.
#[derive(Clone)]
pub struct AdjustmentLedger {
    store: Arc<dyn PayrollStore>,
}

impl AdjustmentLedger {
    /// Creates a ledger over the given store.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self { store }
    }

    /// Adds an adjustment to a draft run and returns the stored record.
    ///
    /// Magnitudes are unbounded, but an adjustment that would push the run's
    /// totals out of the `Decimal` range is refused with `AmountOverflow`.
    pub async fn add(
        &self,
        run_id: Uuid,
        request: NewAdjustment,
    ) -> EngineResult<PayrollRunAdjustment> {
        let run = self.load_editable(run_id).await?;

        if request.amount < Decimal::ZERO {
            return Err(EngineError::NegativeAdjustmentAmount {
                amount: request.amount,
            });
        }
        if request.name.trim().is_empty() {
            return Err(EngineError::InvalidAdjustment {
                message: "name must not be empty".to_string(),
            });
        }

        let snapshots = self.store.list_snapshots(run_id).await?;
        if !snapshots
            .iter()
            .any(|s| s.employee_id == request.employee_id)
        {
            return Err(EngineError::EmployeeNotInRun {
                run_id,
                employee_id: request.employee_id,
            });
        }

        let adjustment = PayrollRunAdjustment::from_request(run_id, request);

        let mut adjustments = self.store.list_adjustments(run_id).await?;
        adjustments.push(adjustment.clone());
        if let Err(err) = build_register(run.clone(), snapshots, adjustments) {
            tracing::warn!(
                run_id = %run_id,
                employee_id = %adjustment.employee_id,
                amount = %adjustment.amount,
                error = %err,
                "Rejected adjustment; totals would be out of range"
            );
            return Err(err);
        }

        self.bump_revision(&run).await?;
        self.store.insert_adjustment(&adjustment).await?;

        tracing::info!(
            run_id = %run_id,
            adjustment_id = %adjustment.id,
            employee_id = %adjustment.employee_id,
            adjustment_type = ?adjustment.adjustment_type,
            amount = %adjustment.amount,
            "Adjustment added"
        );

        Ok(adjustment)
    }

    /// Removes an adjustment from its draft run.
    pub async fn remove(&self, adjustment_id: Uuid) -> EngineResult<()> {
        let adjustment = self
            .store
            .get_adjustment(adjustment_id)
            .await?
            .ok_or(EngineError::AdjustmentNotFound { adjustment_id })?;
        let run = self.load_editable(adjustment.run_id).await?;

        self.bump_revision(&run).await?;
        self.store.delete_adjustment(adjustment_id).await?;

        tracing::info!(
            run_id = %run.id,
            adjustment_id = %adjustment_id,
            "Adjustment removed"
        );

        Ok(())
    }

    /// Lists a run's adjustments in the order they were recorded.
    pub async fn list_by_run(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunAdjustment>> {
        self.store.list_adjustments(run_id).await
    }

    async fn load_editable(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        let run = self
            .store
            .get_run(run_id)
            .await?
            .ok_or(EngineError::RunNotFound { run_id })?;

        if let Err(err) = require_draft(&run) {
            tracing::warn!(
                run_id = %run_id,
                status = %run.status,
                action = %RunAction::EditAdjustments,
                "Rejected adjustment edit on locked run"
            );
            return Err(err);
        }
        Ok(run)
    }

    async fn bump_revision(&self, run: &PayrollRun) -> EngineResult<()> {
        let mut updated = run.clone();
        updated.revision += 1;
        self.store.update_run(&updated, run.revision).await
    }
}
