//! One-time, run-scoped earnings and deductions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an adjustment is added to gross pay or to total deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// Added to gross pay (bonus, overtime payout, ...).
    Earning,
    /// Added to total deductions (advance recovery, penalty, ...).
    Deduction,
}

/// A request to record an adjustment against a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdjustment {
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub adjustment_type: AdjustmentType,
    /// Display name (e.g. "Q1 Bonus").
    pub name: String,
    /// Unsigned magnitude; the type determines the sign.
    pub amount: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// A stored adjustment. Kept separate from the snapshot and merged only at
/// calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunAdjustment {
    /// Unique identifier for the adjustment.
    pub id: Uuid,
    /// The owning run.
    pub run_id: Uuid,
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub adjustment_type: AdjustmentType,
    /// Display name.
    pub name: String,
    /// Unsigned magnitude.
    pub amount: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// When the adjustment was recorded.
    pub created_at: DateTime<Utc>,
}

impl PayrollRunAdjustment {
    /// Builds a stored adjustment for a run from a request.
    pub fn from_request(run_id: Uuid, request: NewAdjustment) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            employee_id: request.employee_id,
            adjustment_type: request.adjustment_type,
            name: request.name,
            amount: request.amount,
            note: request.note,
            created_at: Utc::now(),
        }
    }

    /// Returns true for earnings.
    pub fn is_earning(&self) -> bool {
        self.adjustment_type == AdjustmentType::Earning
    }
}
