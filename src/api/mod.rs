//! HTTP API module for the payroll engine.
//!
//! A thin axum surface over [`PayrollRunService`](crate::run::PayrollRunService):
//! one route per wizard step or run action.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateRunRequest, FinalizeRequest, FindDraftQuery, IssuePayslipsRequest, ListRunsQuery,
    SnapshotRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
