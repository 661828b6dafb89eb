//! Payroll run commands.
//!
//! [`PayrollRunService`] is the framework-free surface of the engine: each
//! wizard step or action is one async method taking explicit inputs and
//! returning a result or an [`EngineError`].

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::calculation::{
    NO_STATUTORY_RATE_WARNING, RegisterRow, build_register, register_rows, resolve_compensation,
};
use crate::config::PayrollSettings;
use crate::directory::EmployeeDirectory;
use crate::error::{EngineError, EngineResult};
use crate::issuer::{PayslipIssuer, build_payslips, summarize_issuance};
use crate::models::{
    Employee, IssuanceSummary, NewAdjustment, PayPeriod, PayrollRegister, PayrollRun,
    PayrollRunAdjustment, PayrollRunEmployee, PayslipBatch, RunAction, RunStatus,
};
use crate::store::PayrollStore;

use super::ledger::AdjustmentLedger;
use super::state::require_draft;

/// Orchestrates the payroll run lifecycle over its collaborators.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::directory::MemoryDirectory;
/// use payroll_engine::issuer::MemoryIssuer;
/// use payroll_engine::models::PayPeriod;
/// use payroll_engine::run::PayrollRunService;
/// use payroll_engine::store::MemoryStore;
///
/// # async fn example() -> Result<(), payroll_engine::error::EngineError> {
/// let config = ConfigLoader::load("./config/default")?;
/// let service = PayrollRunService::new(
///     Arc::new(MemoryStore::new()),
///     Arc::new(MemoryDirectory::from_config(&config)),
///     Arc::new(MemoryIssuer::default()),
///     config.settings().clone(),
/// );
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// )?;
/// let run = service.create_run("riyadh_hq", period, "hr.admin").await?;
/// service.snapshot_employees(run.id, &["emp_001".to_string()]).await?;
/// let finalized = service.finalize(run.id, None).await?;
/// println!("Total net: {:?}", finalized.total_amount);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PayrollRunService {
    store: Arc<dyn PayrollStore>,
    directory: Arc<dyn EmployeeDirectory>,
    issuer: Arc<dyn PayslipIssuer>,
    ledger: AdjustmentLedger,
    settings: PayrollSettings,
}

impl PayrollRunService {
    /// Creates a service over the given collaborators and settings.
    pub fn new(
        store: Arc<dyn PayrollStore>,
        directory: Arc<dyn EmployeeDirectory>,
        issuer: Arc<dyn PayslipIssuer>,
        settings: PayrollSettings,
    ) -> Self {
        let ledger = AdjustmentLedger::new(Arc::clone(&store));
        Self {
            store,
            directory,
            issuer,
            ledger,
            settings,
        }
    }

    /// Returns the settings the service was built with.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Creates a draft run for a location and pay period.
    ///
    /// Fails with `DuplicateDraft` when a draft already exists for the pair;
    /// the error names the draft to resume.
    pub async fn create_run(
        &self,
        location_id: &str,
        pay_period: PayPeriod,
        created_by: &str,
    ) -> EngineResult<PayrollRun> {
        let location = self.directory.work_location(location_id).await?;
        let run = PayrollRun::new_draft(&location.id, &location.currency, pay_period, created_by);

        if let Err(err) = self
            .store
            .insert_draft(&run, self.settings.draft_conflict)
            .await
        {
            if let EngineError::DuplicateDraft {
                existing_run_id, ..
            } = &err
            {
                tracing::warn!(
                    location_id = %location_id,
                    pay_period = %pay_period,
                    existing_run_id = %existing_run_id,
                    "Draft already exists for location and period"
                );
            }
            return Err(err);
        }

        tracing::info!(
            run_id = %run.id,
            location_id = %run.location_id,
            pay_period = %run.pay_period,
            created_by = %run.created_by,
            "Payroll run created"
        );

        Ok(run)
    }

    /// Finds the draft a new run for the location and period would collide with.
    pub async fn find_draft(
        &self,
        location_id: &str,
        pay_period: &PayPeriod,
    ) -> EngineResult<Option<PayrollRun>> {
        self.store
            .find_draft(location_id, pay_period, self.settings.draft_conflict)
            .await
    }

    /// Gets a run. Fails with `RunNotFound`.
    pub async fn get_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        self.store
            .get_run(run_id)
            .await?
            .ok_or(EngineError::RunNotFound { run_id })
    }

    /// Lists runs, newest pay period first.
    pub async fn list_runs(&self, location_id: Option<&str>) -> EngineResult<Vec<PayrollRun>> {
        self.store.list_runs(location_id).await
    }

    /// Active employees offered for selection at a location.
    pub async fn available_employees(&self, location_id: &str) -> EngineResult<Vec<Employee>> {
        self.directory.work_location(location_id).await?;
        self.directory.employees_by_location(location_id).await
    }

    /// Replaces the run's snapshot set with the selected employees' current data.
    ///
    /// Duplicate ids are ignored; selection order is kept. After this call,
    /// edits to master data do not reach the run until it is snapshotted again.
    pub async fn snapshot_employees(
        &self,
        run_id: Uuid,
        employee_ids: &[String],
    ) -> EngineResult<Vec<PayrollRunEmployee>> {
        let run = self.get_run(run_id).await?;
        self.require_editable(&run, RunAction::SnapshotEmployees)?;

        let location = self.directory.work_location(&run.location_id).await?;
        let employees = self
            .directory
            .employees_by_location(&run.location_id)
            .await?;

        let now = Utc::now();
        let mut seen = HashSet::new();
        let mut snapshots = Vec::new();

        for employee_id in employee_ids {
            if !seen.insert(employee_id.as_str()) {
                continue;
            }
            let employee = employees
                .iter()
                .find(|e| &e.id == employee_id)
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.clone(),
                    location_id: run.location_id.clone(),
                })?;

            let resolved = resolve_compensation(employee, &location)?;
            for warning in &resolved.warnings {
                if warning.code == NO_STATUTORY_RATE_WARNING {
                    tracing::warn!(
                        run_id = %run_id,
                        employee_id = %employee.id,
                        nationality = %employee.nationality,
                        "No statutory rate configured; contribution is zero"
                    );
                }
            }

            snapshots.push(PayrollRunEmployee::capture(run_id, employee, resolved, now)?);
        }

        self.bump_revision(&run).await?;
        self.store
            .replace_snapshots(run_id, snapshots.clone())
            .await?;

        tracing::info!(
            run_id = %run_id,
            employee_count = snapshots.len(),
            "Employees snapshotted"
        );

        Ok(snapshots)
    }

    /// Current snapshots of a run.
    pub async fn list_snapshots(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunEmployee>> {
        self.get_run(run_id).await?;
        self.store.list_snapshots(run_id).await
    }

    /// Adds a one-time earning or deduction to a draft run.
    pub async fn add_adjustment(
        &self,
        run_id: Uuid,
        request: NewAdjustment,
    ) -> EngineResult<PayrollRunAdjustment> {
        self.ledger.add(run_id, request).await
    }

    /// Removes an adjustment from a draft run.
    pub async fn remove_adjustment(&self, run_id: Uuid, adjustment_id: Uuid) -> EngineResult<()> {
        let owned = self
            .store
            .get_adjustment(adjustment_id)
            .await?
            .is_some_and(|a| a.run_id == run_id);
        if !owned {
            return Err(EngineError::AdjustmentNotFound { adjustment_id });
        }
        self.ledger.remove(adjustment_id).await
    }

    /// Adjustments recorded against a run, oldest first.
    pub async fn list_adjustments(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunAdjustment>> {
        self.get_run(run_id).await?;
        self.ledger.list_by_run(run_id).await
    }

    /// Computes the register from the latest stored snapshots and adjustments.
    pub async fn register(&self, run_id: Uuid) -> EngineResult<PayrollRegister> {
        let run = self.get_run(run_id).await?;
        let snapshots = self.store.list_snapshots(run_id).await?;
        let adjustments = self.store.list_adjustments(run_id).await?;
        build_register(run, snapshots, adjustments).inspect_err(|err| {
            tracing::warn!(run_id = %run_id, error = %err, "Register totals out of range");
        })
    }

    /// Locks a draft run's totals.
    ///
    /// Totals are recomputed here from the latest data. When
    /// `expected_revision` is given, the run must not have changed since the
    /// caller displayed it. The stored update is conditional on the revision
    /// read here, so an edit landing mid-finalize fails the finalize with
    /// `StaleRun` rather than being left out of the frozen totals.
    pub async fn finalize(
        &self,
        run_id: Uuid,
        expected_revision: Option<u64>,
    ) -> EngineResult<PayrollRun> {
        let run = self.get_run(run_id).await?;

        if let Some(expected) = expected_revision.filter(|e| *e != run.revision) {
            tracing::warn!(
                run_id = %run_id,
                expected,
                actual = run.revision,
                "Finalize rejected; run changed since it was displayed"
            );
            return Err(EngineError::StaleRun {
                run_id,
                expected,
                actual: run.revision,
            });
        }

        let next = self.transition(&run, RunAction::Finalize)?;

        let register = self.register(run_id).await?;
        if register.run.revision != run.revision {
            return Err(EngineError::StaleRun {
                run_id,
                expected: run.revision,
                actual: register.run.revision,
            });
        }
        if register.validation.has_blocking() {
            let issues = register.validation.blocking();
            tracing::warn!(
                run_id = %run_id,
                blocking_issues = issues.len(),
                "Finalize blocked by validation"
            );
            return Err(EngineError::ValidationBlocked { run_id, issues });
        }

        let mut updated = run.clone();
        updated.status = next;
        updated.total_amount = Some(register.totals.total_net);
        updated.employee_count = register.totals.employee_count;
        updated.totals = Some(register.totals);
        updated.finalized_at = Some(Utc::now());
        updated.revision += 1;
        self.store.update_run(&updated, run.revision).await?;

        tracing::info!(
            run_id = %run_id,
            employee_count = updated.employee_count,
            total_net = ?updated.total_amount,
            "Payroll run finalized"
        );

        Ok(updated)
    }

    /// Generates payslips for a finalized run through the issuer.
    ///
    /// Per-employee failures are returned in the summary and do not stop the
    /// run from moving to `payslips_issued`. If the issuer cannot complete the
    /// operation at all, the run stays `finalized`.
    pub async fn issue_payslips(
        &self,
        run_id: Uuid,
        send_email: bool,
    ) -> EngineResult<IssuanceSummary> {
        let run = self.get_run(run_id).await?;
        let next = self.transition(&run, RunAction::IssuePayslips)?;

        let snapshots = self.store.list_snapshots(run_id).await?;
        let adjustments = self.store.list_adjustments(run_id).await?;
        let batch = PayslipBatch {
            run_id,
            send_email,
            payslips: build_payslips(&run, snapshots, adjustments, &self.settings)?,
        };

        let report = match self.issuer.issue(&batch).await {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(run_id = %run_id, error = %err, "Payslip issuance failed");
                return Err(match err {
                    failed @ EngineError::IssuanceFailed { .. } => failed,
                    other => EngineError::IssuanceFailed {
                        run_id,
                        message: other.to_string(),
                    },
                });
            }
        };

        let summary = summarize_issuance(&batch, report);
        for failure in &summary.failures {
            tracing::warn!(
                run_id = %run_id,
                employee_id = %failure.employee_id,
                reason = %failure.reason,
                "Payslip generation failed for employee"
            );
        }

        let mut updated = run.clone();
        updated.status = next;
        updated.payslips_issued_at = Some(Utc::now());
        updated.payslips_emailed = send_email;
        updated.revision += 1;
        self.store.update_run(&updated, run.revision).await?;

        tracing::info!(
            run_id = %run_id,
            issued = summary.issued.len(),
            failed = summary.failures.len(),
            template = %summary.template_used,
            send_email,
            "Payslips issued"
        );

        Ok(summary)
    }

    /// Deletes a draft run with its snapshots and adjustments.
    ///
    /// The store re-checks status and revision under its own lock, so a
    /// finalize racing this call either wins and the delete fails, or loses
    /// with `StaleRun`.
    pub async fn delete_run(&self, run_id: Uuid) -> EngineResult<()> {
        let run = self.get_run(run_id).await?;
        self.transition(&run, RunAction::Delete)?;
        self.store.delete_run(run_id, run.revision).await?;

        tracing::info!(run_id = %run_id, "Payroll run deleted");
        Ok(())
    }

    /// Flat register rows rounded to the display precision.
    pub async fn export_rows(&self, run_id: Uuid) -> EngineResult<Vec<RegisterRow>> {
        let register = self.register(run_id).await?;
        register_rows(&register, self.settings.display_decimal_places)
    }

    fn require_editable(&self, run: &PayrollRun, action: RunAction) -> EngineResult<()> {
        require_draft(run).inspect_err(|_| {
            tracing::warn!(
                run_id = %run.id,
                status = %run.status,
                action = %action,
                "Rejected edit on locked run"
            );
        })
    }

    /// Applies a lifecycle action, returning the status of a run that survives it.
    fn transition(&self, run: &PayrollRun, action: RunAction) -> EngineResult<RunStatus> {
        match run.status.transition(action) {
            Ok(next) => Ok(next.unwrap_or(run.status)),
            Err(err) => {
                tracing::warn!(
                    run_id = %run.id,
                    status = %run.status,
                    action = %action,
                    "Rejected invalid transition"
                );
                Err(err)
            }
        }
    }

    async fn bump_revision(&self, run: &PayrollRun) -> EngineResult<()> {
        let mut updated = run.clone();
        updated.revision += 1;
        self.store.update_run(&updated, run.revision).await
    }
}
