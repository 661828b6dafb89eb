//! In-memory employee directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EmployeeDirectory;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, WorkLocation};

#[derive(Debug, Default)]
struct DirectoryState {
    employees: BTreeMap<String, Employee>,
    locations: BTreeMap<String, WorkLocation>,
}

/// Directory backed by in-process maps. Employees can be edited at any time,
/// which is how master-data drift is exercised against existing snapshots.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl MemoryDirectory {
    /// Creates a directory holding the given locations and no employees.
    pub fn new(locations: impl IntoIterator<Item = WorkLocation>) -> Self {
        let locations = locations
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect();
        Self {
            state: RwLock::new(DirectoryState {
                employees: BTreeMap::new(),
                locations,
            }),
        }
    }

    /// Creates a directory seeded with the configured locations.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(config.locations().iter().cloned())
    }

    /// Inserts or replaces an employee.
    pub async fn upsert_employee(&self, employee: Employee) {
        let mut state = self.state.write().await;
        state.employees.insert(employee.id.clone(), employee);
    }

    /// Inserts or replaces a work location.
    pub async fn upsert_location(&self, location: WorkLocation) {
        let mut state = self.state.write().await;
        state.locations.insert(location.id.clone(), location);
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryDirectory {
    async fn employees_by_location(&self, location_id: &str) -> EngineResult<Vec<Employee>> {
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .filter(|e| e.active && e.work_location_id == location_id)
            .cloned()
            .collect())
    }

    async fn work_location(&self, location_id: &str) -> EngineResult<WorkLocation> {
        let state = self.state.read().await;
        state
            .locations
            .get(location_id)
            .cloned()
            .ok_or_else(|| EngineError::LocationNotFound {
                location_id: location_id.to_string(),
            })
    }
}
