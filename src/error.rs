use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;

/// Failure kinds surfaced by the leave lifecycle. Everything except
/// `Storage` is a local validation or state-machine failure and is safe
/// to show to the caller verbatim.
#[derive(Debug, Display)]
pub enum LeaveError {
    #[display(fmt = "Please select both start and end dates")]
    MissingDates,
    #[display(fmt = "Invalid leave type. Allowed: vacation, sick, personal, bereavement, unpaid")]
    InvalidLeaveType,
    #[display(fmt = "End date cannot be before start date")]
    EndBeforeStart,
    #[display(fmt = "Leave must be at least one day")]
    ZeroDuration,
    #[display(fmt = "Leave request not found")]
    NotFound,
    #[display(fmt = "Leave request already processed")]
    InvalidTransition,
    #[display(fmt = "Please provide a reason for rejecting this leave request")]
    MissingRejectionReason,
    #[display(fmt = "Internal Server Error")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for LeaveError {
    fn from(err: anyhow::Error) -> Self {
        LeaveError::Storage(err)
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::NotFound => StatusCode::NOT_FOUND,
            LeaveError::InvalidTransition => StatusCode::CONFLICT,
            LeaveError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Storage(err) = self {
            tracing::error!(error = %err, "Storage failure");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}
