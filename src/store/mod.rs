use anyhow::Result;
use async_trait::async_trait;

use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Authoritative record store behind the lifecycle service. One writer per
/// id at a time; `transition` is the only conditional write.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    async fn insert(&self, request: &LeaveRequest) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<LeaveRequest>>;

    /// Persists an already-transitioned record, but only while the stored
    /// row is still pending. Returns `false` when another decision won the
    /// race, leaving the stored record untouched.
    async fn transition(&self, request: &LeaveRequest) -> Result<bool>;

    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<LeaveRequest>>;

    async fn list_pending(&self) -> Result<Vec<LeaveRequest>>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self, tenant_id: Option<&str>) -> Result<Vec<Employee>>;

    async fn get(&self, id: &str) -> Result<Option<Employee>>;
}
