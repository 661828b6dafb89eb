//! Read-only employee and work-location provider.
//!
//! Master data belongs to the HR side of the system. Payroll reads it only
//! when snapshotting a run.

mod memory;

pub use memory::MemoryDirectory;

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::{Employee, WorkLocation};

/// Source of employees and work locations.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Active employees paid under the location, ordered by id.
    async fn employees_by_location(&self, location_id: &str) -> EngineResult<Vec<Employee>>;

    /// Gets a work location. Fails with `LocationNotFound`.
    async fn work_location(&self, location_id: &str) -> EngineResult<WorkLocation>;
}
