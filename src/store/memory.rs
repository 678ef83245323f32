use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::{EmployeeStore, LeaveStore};
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;

/// In-process store keyed by request id. Backs the test suite and any
/// deployment that does not need durability.
#[derive(Default)]
pub struct MemoryStore {
    leaves: RwLock<HashMap<String, LeaveRequest>>,
    employees: RwLock<HashMap<String, Employee>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, employee: Employee) -> Result<()> {
        self.employees
            .write()
            .map_err(|_| anyhow!("employee map lock poisoned"))?
            .insert(employee.id.clone(), employee);
        Ok(())
    }
}

fn newest_first(requests: &mut [LeaveRequest]) {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn insert(&self, request: &LeaveRequest) -> Result<()> {
        self.leaves
            .write()
            .map_err(|_| anyhow!("leave map lock poisoned"))?
            .insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LeaveRequest>> {
        Ok(self
            .leaves
            .read()
            .map_err(|_| anyhow!("leave map lock poisoned"))?
            .get(id)
            .cloned())
    }

    async fn transition(&self, request: &LeaveRequest) -> Result<bool> {
        let mut leaves = self
            .leaves
            .write()
            .map_err(|_| anyhow!("leave map lock poisoned"))?;
        match leaves.get_mut(&request.id) {
            Some(stored) if stored.is_pending() => {
                *stored = request.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> = self
            .leaves
            .read()
            .map_err(|_| anyhow!("leave map lock poisoned"))?
            .values()
            .filter(|request| request.employee_id == employee_id)
            .cloned()
            .collect();
        newest_first(&mut requests);
        Ok(requests)
    }

    async fn list_pending(&self) -> Result<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> = self
            .leaves
            .read()
            .map_err(|_| anyhow!("leave map lock poisoned"))?
            .values()
            .filter(|request| request.is_pending())
            .cloned()
            .collect();
        newest_first(&mut requests);
        Ok(requests)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list(&self, tenant_id: Option<&str>) -> Result<Vec<Employee>> {
        let employees = self
            .employees
            .read()
            .map_err(|_| anyhow!("employee map lock poisoned"))?;
        let mut result: Vec<Employee> = employees
            .values()
            .filter(|employee| tenant_id.is_none_or(|tenant| employee.tenant_id == tenant))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn get(&self, id: &str) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .map_err(|_| anyhow!("employee map lock poisoned"))?
            .get(id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::{CreateLeave, LeaveStatus};
    use chrono::NaiveDate;

    fn request(employee_id: &str) -> LeaveRequest {
        LeaveRequest::new(CreateLeave {
            employee_id: employee_id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 5),
            leave_type: "vacation".to_string(),
            reason: None,
        })
        .unwrap()
    }

    #[actix_web::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryStore::new();
        let request = request("e1");
        store.insert(&request).await.unwrap();

        let stored = LeaveStore::get(&store, &request.id).await.unwrap().unwrap();
        assert_eq!(stored.employee_id, "e1");
        assert!(LeaveStore::get(&store, "missing").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn transition_is_conditional_on_pending() {
        let store = MemoryStore::new();
        let mut request = request("e1");
        store.insert(&request).await.unwrap();

        request.approve().unwrap();
        assert!(store.transition(&request).await.unwrap());

        // A racing decision sees the already-settled row and loses.
        let mut racing = LeaveStore::get(&store, &request.id).await.unwrap().unwrap();
        racing.status = LeaveStatus::Rejected;
        assert!(!store.transition(&racing).await.unwrap());

        let stored = LeaveStore::get(&store, &request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Approved);
    }

    #[actix_web::test]
    async fn queries_filter_by_employee_and_status() {
        let store = MemoryStore::new();
        let first = request("e1");
        let mut second = request("e1");
        second.approve().unwrap();
        let third = request("e2");

        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();
        store.insert(&third).await.unwrap();

        let mine = store.list_by_employee("e1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.employee_id == "e1"));

        let pending = store.list_pending().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r.is_pending()));
    }

    #[actix_web::test]
    async fn employees_filter_by_tenant() {
        let store = MemoryStore::new();
        store
            .add_employee(Employee {
                id: "emp1".to_string(),
                tenant_id: "t1".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                department: "Engineering".to_string(),
                status: "active".to_string(),
            })
            .unwrap();
        store
            .add_employee(Employee {
                id: "emp2".to_string(),
                tenant_id: "t2".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
                email: "jane.smith@example.com".to_string(),
                department: "Marketing".to_string(),
                status: "active".to_string(),
            })
            .unwrap();

        assert_eq!(EmployeeStore::list(&store, None).await.unwrap().len(), 2);
        let scoped = EmployeeStore::list(&store, Some("t1")).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, "emp1");
        assert_eq!(scoped[0].display_name(), "John Doe");
    }
}
