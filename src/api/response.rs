//! Response types for the payroll API.
//!
//! This module defines the error body and the mapping from engine errors to
//! HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::DuplicateDraft {
                location_id,
                pay_period,
                existing_run_id,
            } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_DRAFT",
                    message,
                    json!({
                        "location_id": location_id,
                        "pay_period": pay_period,
                        "existing_run_id": existing_run_id,
                    }),
                ),
            ),
            EngineError::RunNotEditable { run_id, status } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "RUN_NOT_EDITABLE",
                    message,
                    json!({ "run_id": run_id, "status": status }),
                ),
            ),
            EngineError::InvalidTransition { current, attempted } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    json!({ "current": current, "attempted": attempted }),
                ),
            ),
            EngineError::StaleRun {
                run_id,
                expected,
                actual,
            } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "STALE_RUN",
                    message,
                    json!({ "run_id": run_id, "expected": expected, "actual": actual }),
                ),
            ),
            EngineError::ValidationBlocked { run_id, issues } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "VALIDATION_BLOCKED",
                    message,
                    json!({ "run_id": run_id, "issues": issues }),
                ),
            ),
            EngineError::RunNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("RUN_NOT_FOUND", message))
            }
            EngineError::AdjustmentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ADJUSTMENT_NOT_FOUND", message),
            ),
            EngineError::LocationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("LOCATION_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotInRun { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("EMPLOYEE_NOT_IN_RUN", message),
            ),
            EngineError::InvalidPayPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PAY_PERIOD", message),
            ),
            EngineError::InvalidAdjustment { .. }
            | EngineError::NegativeAdjustmentAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_ADJUSTMENT", message),
            ),
            EngineError::AmountOverflow { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("AMOUNT_OVERFLOW", message),
            ),
            EngineError::IssuanceFailed { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("ISSUANCE_FAILED", message),
            ),
            EngineError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("STORAGE_ERROR", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
