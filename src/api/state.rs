//! Application state for the payroll API.

use std::sync::Arc;

use crate::run::PayrollRunService;

/// Shared application state.
///
/// Handlers are thin callers of the run service; all state lives behind it.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollRunService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollRunService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the run service.
    pub fn service(&self) -> &PayrollRunService {
        &self.service
    }
}
