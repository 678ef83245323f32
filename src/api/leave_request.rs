use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::LeaveError;
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveStatus, LeaveType};
use crate::service::LeaveService;
use crate::store::EmployeeStore;
use crate::utils::employee_cache;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    /// leave request id
    #[schema(example = "6f4d5a3e-8c1b-4b6e-9d2a-0c7f1e5b9a42")]
    pub id: String,
    /// employee the leave is applied for
    #[schema(example = "e1")]
    pub employee_id: String,
    #[schema(example = "vacation")]
    pub leave_type: LeaveType,
    #[schema(example = "2025-05-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-05-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    /// both endpoints counted
    #[schema(example = 5)]
    pub duration_days: i64,
    pub reason: Option<String>,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[schema(example = "2025-04-20T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<LeaveRequest> for LeaveResponse {
    fn from(request: LeaveRequest) -> Self {
        let duration_days = request.duration_days();
        LeaveResponse {
            id: request.id,
            employee_id: request.employee_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_days,
            reason: request.reason,
            status: request.status,
            rejection_reason: request.rejection_reason,
            created_at: request.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveResponse>,
}

/// Queue row for the manager dashboard; carries the employee display name
/// so the front-end does not have to join it per row.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingLeaveResponse {
    #[serde(flatten)]
    pub leave: LeaveResponse,
    #[schema(example = "John Doe")]
    pub employee_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PendingLeaveListResponse {
    pub data: Vec<PendingLeaveResponse>,
}

/// The employee dashboard tabs: everything not pending or approved lands in
/// `other`.
#[derive(Serialize, ToSchema)]
pub struct LeaveSummaryResponse {
    pub pending: Vec<LeaveResponse>,
    pub approved: Vec<LeaveResponse>,
    pub other: Vec<LeaveResponse>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilter {
    /// Employee whose requests to list
    #[param(example = "e1")]
    pub employee_id: String,
    /// Optional status filter
    #[param(example = "pending")]
    pub status: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFilter {
    /// Employee whose requests to partition
    #[param(example = "e1")]
    pub employee_id: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectLeave {
    #[serde(default)]
    #[schema(example = "Coverage unavailable")]
    pub rejection_reason: Option<String>,
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully", body = LeaveResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "End date cannot be before start date"
        }))
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    service: web::Data<LeaveService>,
    payload: web::Json<CreateLeave>,
) -> Result<impl Responder, LeaveError> {
    let request = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse::from(request)))
}

/* =========================
Approve leave
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{id}/approve",
    params(
        ("id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = LeaveResponse),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        }))
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    service: web::Data<LeaveService>,
    path: web::Path<String>,
) -> Result<impl Responder, LeaveError> {
    let request = service.approve(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse::from(request)))
}

/* =========================
Reject leave
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{id}/reject",
    params(
        ("id" = String, Path, description = "ID of the leave request to reject")
    ),
    request_body = RejectLeave,
    responses(
        (status = 200, description = "Leave rejected successfully", body = LeaveResponse),
        (status = 400, description = "Missing rejection reason", body = Object, example = json!({
            "message": "Please provide a reason for rejecting this leave request"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed")
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    service: web::Data<LeaveService>,
    path: web::Path<String>,
    payload: web::Json<RejectLeave>,
) -> Result<impl Responder, LeaveError> {
    let reason = payload.rejection_reason.clone().unwrap_or_default();
    let request = service.reject(&path.into_inner(), &reason).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse::from(request)))
}

/* =========================
Cancel leave (owner)
========================= */
/// Swagger doc for cancel_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{id}/cancel",
    params(
        ("id" = String, Path, description = "ID of the leave request to cancel")
    ),
    responses(
        (status = 200, description = "Leave cancelled successfully", body = LeaveResponse),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed")
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    service: web::Data<LeaveService>,
    path: web::Path<String>,
) -> Result<impl Responder, LeaveError> {
    let request = service.cancel(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse::from(request)))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{id}",
    params(
        ("id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveResponse),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    service: web::Data<LeaveService>,
    path: web::Path<String>,
) -> Result<impl Responder, LeaveError> {
    let request = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaveResponse::from(request)))
}

/// for listing an employee's leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Leave list for the employee", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    service: web::Data<LeaveService>,
    query: web::Query<LeaveFilter>,
) -> Result<impl Responder, LeaveError> {
    let mut requests = service.list_by_employee(&query.employee_id).await?;
    if let Some(status) = query.status.as_deref() {
        requests.retain(|request| request.status.to_string() == status);
    }
    let response = LeaveListResponse {
        data: requests.into_iter().map(LeaveResponse::from).collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// for the manager approval queue endpoint
#[utoipa::path(
    get,
    path = "/api/leave/pending",
    responses(
        (status = 200, description = "All pending leave requests", body = PendingLeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn pending_leaves(
    service: web::Data<LeaveService>,
    employees: web::Data<dyn EmployeeStore>,
) -> Result<impl Responder, LeaveError> {
    let pending = service.list_pending_for_manager().await?;
    let mut data = Vec::with_capacity(pending.len());
    for request in pending {
        let employee_name =
            employee_cache::display_name(employees.get_ref(), &request.employee_id).await;
        data.push(PendingLeaveResponse {
            leave: LeaveResponse::from(request),
            employee_name,
        });
    }
    Ok(HttpResponse::Ok().json(PendingLeaveListResponse { data }))
}

/// for the employee dashboard tabs endpoint
#[utoipa::path(
    get,
    path = "/api/leave/summary",
    params(SummaryFilter),
    responses(
        (status = 200, description = "Requests split by status tab", body = LeaveSummaryResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_summary(
    service: web::Data<LeaveService>,
    query: web::Query<SummaryFilter>,
) -> Result<impl Responder, LeaveError> {
    let partition = service.partition_for_employee(&query.employee_id).await?;
    let response = LeaveSummaryResponse {
        pending: partition.pending.into_iter().map(LeaveResponse::from).collect(),
        approved: partition.approved.into_iter().map(LeaveResponse::from).collect(),
        other: partition.other.into_iter().map(LeaveResponse::from).collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}
