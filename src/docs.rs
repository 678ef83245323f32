use crate::api::employee::{EmployeeListResponse, EmployeeQuery};
use crate::api::leave_request::{
    LeaveFilter, LeaveListResponse, LeaveResponse, LeaveSummaryResponse, PendingLeaveListResponse,
    PendingLeaveResponse, RejectLeave, SummaryFilter,
};
use crate::model::employee::Employee;
use crate::model::leave_request::{CreateLeave, LeaveStatus, LeaveType};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

This API owns the leave request lifecycle for an HR admin console.

### Key Features
- **Leave Lifecycle**
  - Submit requests, approve/reject as a manager, cancel as the owner
- **Dashboards**
  - Employee self-service list with pending/approved/other tabs
  - Manager approval queue with employee names
- **Employee Directory**
  - Read-only listing, optionally scoped by tenant

### Response Format
- JSON-based RESTful responses, camelCase keys
- Dates exchanged as `YYYY-MM-DD` strings

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::pending_leaves,
        crate::api::leave_request::leave_summary,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::cancel_leave,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee
    ),
    components(
        schemas(
            LeaveType,
            LeaveStatus,
            CreateLeave,
            RejectLeave,
            LeaveFilter,
            SummaryFilter,
            LeaveResponse,
            LeaveListResponse,
            PendingLeaveResponse,
            PendingLeaveListResponse,
            LeaveSummaryResponse,
            Employee,
            EmployeeQuery,
            EmployeeListResponse
        )
    ),
    tags(
        (name = "Leave", description = "Leave lifecycle APIs"),
        (name = "Employee", description = "Employee directory APIs"),
    )
)]
pub struct ApiDoc;
