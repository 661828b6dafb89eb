//! HTTP request handlers for the payroll API.
//!
//! Every handler tags the request with a correlation id, calls one
//! [`PayrollRunService`](crate::run::PayrollRunService) command and maps the
//! outcome to JSON.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{NewAdjustment, PayPeriod};

use super::request::{
    CreateRunRequest, FinalizeRequest, FindDraftQuery, IssuePayslipsRequest, ListRunsQuery,
    SnapshotRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/locations/:location_id/employees",
            get(available_employees_handler),
        )
        .route("/drafts", get(find_draft_handler))
        .route("/runs", post(create_run_handler).get(list_runs_handler))
        .route("/runs/:run_id", get(get_run_handler).delete(delete_run_handler))
        .route(
            "/runs/:run_id/employees",
            get(list_snapshots_handler).put(snapshot_handler),
        )
        .route("/runs/:run_id/register", get(register_handler))
        .route(
            "/runs/:run_id/adjustments",
            post(add_adjustment_handler).get(list_adjustments_handler),
        )
        .route(
            "/runs/:run_id/adjustments/:adjustment_id",
            delete(remove_adjustment_handler),
        )
        .route("/runs/:run_id/finalize", post(finalize_handler))
        .route("/runs/:run_id/payslips", post(issue_payslips_handler))
        .route("/runs/:run_id/export", get(export_handler))
        .with_state(state)
}

/// Logs a failed command and converts it to an HTTP error.
fn failed(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Handler for `GET /locations/:location_id/employees`.
async fn available_employees_handler(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, location_id = %location_id, "Listing selectable employees");

    let employees = state
        .service()
        .available_employees(&location_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(employees))
}

/// Handler for `GET /drafts`: the draft to resume for a location and period.
async fn find_draft_handler(
    State(state): State<AppState>,
    Query(query): Query<FindDraftQuery>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, location_id = %query.location_id, "Looking up draft");

    let pay_period = PayPeriod::new(query.start_date, query.end_date)
        .map_err(|e| failed(correlation_id, e))?;
    let draft = state
        .service()
        .find_draft(&query.location_id, &pay_period)
        .await
        .map_err(|e| failed(correlation_id, e))?;

    match draft {
        Some(run) => Ok(Json(run)),
        None => Err(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new(
                "DRAFT_NOT_FOUND",
                format!(
                    "No draft payroll run for location '{}' ({})",
                    query.location_id, pay_period
                ),
            ),
        }),
    }
}

/// Handler for `POST /runs`.
async fn create_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRunRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create run request");

    let request = parse_body(correlation_id, payload)?;
    let pay_period = request
        .pay_period()
        .map_err(|e| failed(correlation_id, e))?;
    let run = state
        .service()
        .create_run(&request.location_id, pay_period, &request.created_by)
        .await
        .map_err(|e| failed(correlation_id, e))?;

    info!(correlation_id = %correlation_id, run_id = %run.id, "Run created");
    Ok((StatusCode::CREATED, Json(run)))
}

/// Handler for `GET /runs`.
async fn list_runs_handler(
    State(state): State<AppState>,
    Query(query): Query<ListRunsQuery>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let runs = state
        .service()
        .list_runs(query.location_id.as_deref())
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(runs))
}

/// Handler for `GET /runs/:run_id`.
async fn get_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let run = state
        .service()
        .get_run(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(run))
}

/// Handler for `DELETE /runs/:run_id`.
async fn delete_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Processing delete run request");

    state
        .service()
        .delete_run(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `GET /runs/:run_id/employees`.
async fn list_snapshots_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let snapshots = state
        .service()
        .list_snapshots(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(snapshots))
}

/// Handler for `PUT /runs/:run_id/employees`.
async fn snapshot_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<SnapshotRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Processing snapshot request");

    let request = parse_body(correlation_id, payload)?;
    let snapshots = state
        .service()
        .snapshot_employees(run_id, &request.employee_ids)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(snapshots))
}

/// Handler for `GET /runs/:run_id/register`.
async fn register_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let register = state
        .service()
        .register(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(register))
}

/// Handler for `POST /runs/:run_id/adjustments`.
async fn add_adjustment_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<NewAdjustment>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Processing add adjustment request");

    let request = parse_body(correlation_id, payload)?;
    let adjustment = state
        .service()
        .add_adjustment(run_id, request)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok((StatusCode::CREATED, Json(adjustment)))
}

/// Handler for `GET /runs/:run_id/adjustments`.
async fn list_adjustments_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let adjustments = state
        .service()
        .list_adjustments(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(adjustments))
}

/// Handler for `DELETE /runs/:run_id/adjustments/:adjustment_id`.
async fn remove_adjustment_handler(
    State(state): State<AppState>,
    Path((run_id, adjustment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        run_id = %run_id,
        adjustment_id = %adjustment_id,
        "Processing remove adjustment request"
    );

    state
        .service()
        .remove_adjustment(run_id, adjustment_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /runs/:run_id/finalize`.
async fn finalize_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<FinalizeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Processing finalize request");

    let request = parse_body(correlation_id, payload)?;
    let run = state
        .service()
        .finalize(run_id, request.expected_revision)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(run))
}

/// Handler for `POST /runs/:run_id/payslips`.
async fn issue_payslips_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Result<Json<IssuePayslipsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Processing issue payslips request");

    let request = parse_body(correlation_id, payload)?;
    let send_email = request
        .send_email
        .unwrap_or(state.service().settings().payslip.default_send_email);
    let summary = state
        .service()
        .issue_payslips(run_id, send_email)
        .await
        .map_err(|e| failed(correlation_id, e))?;

    if summary.has_failures() {
        warn!(
            correlation_id = %correlation_id,
            run_id = %run_id,
            failures = summary.failures.len(),
            "Payslips issued with failures"
        );
    }
    Ok(Json(summary))
}

/// Handler for `GET /runs/:run_id/export`.
async fn export_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let rows = state
        .service()
        .export_rows(run_id)
        .await
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(rows))
}
