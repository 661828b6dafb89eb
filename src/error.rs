//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a payroll-run command. Advisory
//! conditions (missing statutory rates, partial payslip failures, zero base
//! salary) are not errors; they travel as warnings inside successful results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{PayPeriod, RunAction, RunStatus, ValidationIssue};

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A draft already exists for the location and pay period; resume it instead.
    #[error(
        "A draft payroll run already exists for location '{location_id}' ({pay_period}): {existing_run_id}"
    )]
    DuplicateDraft {
        /// The work location of the attempted run.
        location_id: String,
        /// The pay period of the attempted run.
        pay_period: PayPeriod,
        /// The draft that should be resumed.
        existing_run_id: Uuid,
    },

    /// A mutation was attempted on a run that is no longer a draft.
    #[error("Payroll run {run_id} is not editable in status '{status}'")]
    RunNotEditable {
        /// The run that was targeted.
        run_id: Uuid,
        /// The run's current status.
        status: RunStatus,
    },

    /// The run's state machine does not allow the requested transition.
    #[error("Cannot {attempted} a payroll run in status '{current}'")]
    InvalidTransition {
        /// The status the run is currently in.
        current: RunStatus,
        /// The transition that was attempted.
        attempted: RunAction,
    },

    /// Finalize was refused because blocking validation issues are present.
    #[error("Payroll run {run_id} cannot be finalized: {} blocking issue(s)", issues.len())]
    ValidationBlocked {
        /// The run that failed validation.
        run_id: Uuid,
        /// The blocking issues, itemized.
        issues: Vec<ValidationIssue>,
    },

    /// The run changed since the caller last read it.
    #[error("Payroll run {run_id} changed (expected revision {expected}, found {actual})")]
    StaleRun {
        /// The run that changed.
        run_id: Uuid,
        /// The revision the caller based its action on.
        expected: u64,
        /// The revision currently stored.
        actual: u64,
    },

    /// No payroll run exists with the given id.
    #[error("Payroll run not found: {run_id}")]
    RunNotFound {
        /// The missing run id.
        run_id: Uuid,
    },

    /// No adjustment exists with the given id.
    #[error("Adjustment not found: {adjustment_id}")]
    AdjustmentNotFound {
        /// The missing adjustment id.
        adjustment_id: Uuid,
    },

    /// The work location is unknown to the directory.
    #[error("Work location not found: {location_id}")]
    LocationNotFound {
        /// The missing location id.
        location_id: String,
    },

    /// A selected employee is not an active employee of the run's location.
    #[error("Active employee '{employee_id}' not found at location '{location_id}'")]
    EmployeeNotFound {
        /// The employee that was requested.
        employee_id: String,
        /// The location that was searched.
        location_id: String,
    },

    /// An adjustment targeted an employee that is not snapshotted into the run.
    #[error("Employee '{employee_id}' is not part of payroll run {run_id}")]
    EmployeeNotInRun {
        /// The run that was targeted.
        run_id: Uuid,
        /// The employee that is missing from the run.
        employee_id: String,
    },

    /// The pay period end precedes its start.
    #[error("Invalid pay period: end {end_date} is before start {start_date}")]
    InvalidPayPeriod {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// An adjustment request was malformed.
    #[error("Invalid adjustment: {message}")]
    InvalidAdjustment {
        /// What was wrong with the request.
        message: String,
    },

    /// An adjustment amount was negative; the type carries the sign.
    #[error("Adjustment amount must be a non-negative magnitude, got {amount}")]
    NegativeAdjustmentAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// A monetary figure grew past the range `Decimal` can represent.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow {
        /// The figure being computed when the overflow occurred.
        context: String,
    },

    /// The payslip issuer could not complete the issuance operation at all.
    #[error("Payslip issuance for run {run_id} failed: {message}")]
    IssuanceFailed {
        /// The run being issued.
        run_id: Uuid,
        /// The collaborator's failure description.
        message: String,
    },

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
