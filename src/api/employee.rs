use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::employee::Employee;
use crate::store::EmployeeStore;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    /// Filter by tenant
    #[param(example = "tenant-1")]
    pub tenant_id: Option<String>,
}

#[derive(serde::Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
}

/// Employee directory listing
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<dyn EmployeeStore>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let employees = store
        .list(query.tenant_id.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list employees");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse { data: employees }))
}

/// Employee lookup by id
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let employee = store.get(&id).await.map_err(|e| {
        error!(error = %e, id = %id, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}
