//! Payroll run record and its lifecycle vocabulary.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, RunTotals};

/// Lifecycle status of a payroll run.
///
/// Runs move strictly forward: `draft → finalized → payslips_issued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Being assembled; snapshots and adjustments may change.
    Draft,
    /// Totals are locked; eligible for payslip issuance.
    Finalized,
    /// Payslips have been issued.
    PayslipsIssued,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Draft => write!(f, "draft"),
            RunStatus::Finalized => write!(f, "finalized"),
            RunStatus::PayslipsIssued => write!(f, "payslips_issued"),
        }
    }
}

/// An operation that acts on a run's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    /// Replace the run's employee snapshots.
    SnapshotEmployees,
    /// Add or remove a one-time adjustment.
    EditAdjustments,
    /// Lock totals.
    Finalize,
    /// Generate and distribute payslips.
    IssuePayslips,
    /// Remove the run and everything it owns.
    Delete,
}

impl fmt::Display for RunAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunAction::SnapshotEmployees => write!(f, "snapshot employees of"),
            RunAction::EditAdjustments => write!(f, "edit adjustments of"),
            RunAction::Finalize => write!(f, "finalize"),
            RunAction::IssuePayslips => write!(f, "issue payslips for"),
            RunAction::Delete => write!(f, "delete"),
        }
    }
}

/// A payroll run for one work location and pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The work location being paid.
    pub location_id: String,
    /// Currency of the location, captured at creation.
    pub currency: String,
    /// The period being paid.
    pub pay_period: PayPeriod,
    /// Current lifecycle status.
    pub status: RunStatus,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// Who created the run.
    pub created_by: String,
    /// Incremented on every stored change; used to detect stale reads.
    pub revision: u64,
    /// Total net pay, frozen at finalize.
    pub total_amount: Option<Decimal>,
    /// Number of employees paid, frozen at finalize.
    pub employee_count: u32,
    /// Full run totals, frozen at finalize.
    pub totals: Option<RunTotals>,
    /// When the run was finalized.
    pub finalized_at: Option<DateTime<Utc>>,
    /// When payslips were issued.
    pub payslips_issued_at: Option<DateTime<Utc>>,
    /// Whether payslips were also emailed to employees.
    #[serde(default)]
    pub payslips_emailed: bool,
}

impl PayrollRun {
    /// Creates a fresh draft run.
    pub fn new_draft(
        location_id: impl Into<String>,
        currency: impl Into<String>,
        pay_period: PayPeriod,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            location_id: location_id.into(),
            currency: currency.into(),
            pay_period,
            status: RunStatus::Draft,
            created_at: Utc::now(),
            created_by: created_by.into(),
            revision: 0,
            total_amount: None,
            employee_count: 0,
            totals: None,
            finalized_at: None,
            payslips_issued_at: None,
            payslips_emailed: false,
        }
    }

    /// Returns true while the run may still be edited.
    pub fn is_draft(&self) -> bool {
        self.status == RunStatus::Draft
    }
}
