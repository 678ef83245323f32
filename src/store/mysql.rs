use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;
use sqlx::prelude::FromRow;

use super::{EmployeeStore, LeaveStore};
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

/// MySQL-backed store. Enum columns are plain strings in the schema and are
/// parsed at the edge, so a corrupted row surfaces as a storage error
/// instead of a decode panic.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LeaveRow {
    id: String,
    employee_id: String,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<String>,
    status: String,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = anyhow::Error;

    fn try_from(row: LeaveRow) -> Result<Self> {
        let leave_type = row
            .leave_type
            .parse::<LeaveType>()
            .with_context(|| format!("unknown leave_type '{}' for {}", row.leave_type, row.id))?;
        let status = row
            .status
            .parse::<LeaveStatus>()
            .with_context(|| format!("unknown status '{}' for {}", row.status, row.id))?;
        Ok(LeaveRequest {
            id: row.id,
            employee_id: row.employee_id,
            leave_type,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            status,
            rejection_reason: row.rejection_reason,
            created_at: row.created_at,
        })
    }
}

const LEAVE_COLUMNS: &str =
    "id, employee_id, leave_type, start_date, end_date, reason, status, rejection_reason, created_at";

fn rows_to_requests(rows: Vec<LeaveRow>) -> Result<Vec<LeaveRequest>> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

#[async_trait]
impl LeaveStore for MySqlStore {
    async fn insert(&self, request: &LeaveRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, employee_id, leave_type, start_date, end_date, reason, status, rejection_reason, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.employee_id)
        .bind(request.leave_type.to_string())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.reason)
        .bind(request.status.to_string())
        .bind(&request.rejection_reason)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .context("insert leave request")?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LeaveRequest>> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetch leave request")?;
        row.map(LeaveRequest::try_from).transpose()
    }

    async fn transition(&self, request: &LeaveRequest) -> Result<bool> {
        // The pending guard lives in the WHERE clause; a raced row simply
        // reports zero affected rows.
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, rejection_reason = ?
            WHERE id = ?
            AND status = 'pending'
            "#,
        )
        .bind(request.status.to_string())
        .bind(&request.rejection_reason)
        .bind(&request.id)
        .execute(&self.pool)
        .await
        .context("transition leave request")?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = ? ORDER BY created_at DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .context("list leave requests by employee")?;
        rows_to_requests(rows)
    }

    async fn list_pending(&self) -> Result<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE status = 'pending' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("list pending leave requests")?;
        rows_to_requests(rows)
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: String,
    tenant_id: String,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    status: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            tenant_id: row.tenant_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            department: row.department,
            status: row.status,
        }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, tenant_id, first_name, last_name, email, department, status";

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn list(&self, tenant_id: Option<&str>) -> Result<Vec<Employee>> {
        let rows = match tenant_id {
            Some(tenant) => {
                sqlx::query_as::<_, EmployeeRow>(&format!(
                    "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE tenant_id = ? ORDER BY id"
                ))
                .bind(tenant)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, EmployeeRow>(&format!(
                    "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("list employees")?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetch employee")?;
        Ok(row.map(Employee::from))
    }
}
