//! Request types for the payroll API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::PayPeriod;

/// Request body for `POST /runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRunRequest {
    /// The work location to pay.
    pub location_id: String,
    /// First day of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// Who is creating the run.
    pub created_by: String,
}

impl CreateRunRequest {
    /// Validates and returns the requested pay period.
    pub fn pay_period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.start_date, self.end_date)
    }
}

/// Query for `GET /runs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRunsQuery {
    /// Restrict to one work location.
    #[serde(default)]
    pub location_id: Option<String>,
}

/// Query for `GET /drafts`, used to resume an existing draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindDraftQuery {
    /// The work location.
    pub location_id: String,
    /// First day of the pay period.
    pub start_date: NaiveDate,
    /// Last day of the pay period.
    pub end_date: NaiveDate,
}

/// Request body for `PUT /runs/:run_id/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    /// The selected employees, in display order.
    pub employee_ids: Vec<String>,
}

/// Request body for `POST /runs/:run_id/finalize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalizeRequest {
    /// The run revision the caller reviewed, if it wants stale-read protection.
    #[serde(default)]
    pub expected_revision: Option<u64>,
}

/// Request body for `POST /runs/:run_id/payslips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuePayslipsRequest {
    /// Whether to email documents; falls back to the configured default.
    #[serde(default)]
    pub send_email: Option<bool>,
}
