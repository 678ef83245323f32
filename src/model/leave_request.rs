use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LeaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Bereavement,
    Unpaid,
}

impl LeaveType {
    /// Human label shown by the dashboards. Display concern only; the
    /// lifecycle itself works with the lowercase wire form.
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Personal => "Personal Leave",
            LeaveType::Bereavement => "Bereavement",
            LeaveType::Unpaid => "Unpaid Leave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// Payload for submitting a new leave request. Dates stay optional and the
/// leave type stays a raw string so that validation can report each missing
/// or malformed field as its own failure instead of a blanket decode error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeave {
    #[schema(example = "e1")]
    pub employee_id: String,
    #[schema(example = "2025-05-01", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2025-05-05", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "vacation")]
    pub leave_type: String,
    #[schema(example = "Annual vacation")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[schema(example = "6f4d5a3e-8c1b-4b6e-9d2a-0c7f1e5b9a42")]
    pub id: String,
    #[schema(example = "e1")]
    pub employee_id: String,
    pub leave_type: LeaveType,
    #[schema(example = "2025-05-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-05-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[schema(example = "2025-04-20T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Calendar days between the endpoints, both inclusive.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

impl LeaveRequest {
    /// Validates the payload and builds a fresh pending record. Checks run
    /// in a fixed order so each bad field surfaces its own failure kind.
    pub fn new(input: CreateLeave) -> Result<Self, LeaveError> {
        let (start_date, end_date) = match (input.start_date, input.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(LeaveError::MissingDates),
        };

        let leave_type = input
            .leave_type
            .parse::<LeaveType>()
            .map_err(|_| LeaveError::InvalidLeaveType)?;

        if start_date > end_date {
            return Err(LeaveError::EndBeforeStart);
        }

        // Inclusive day count must still come out positive on its own.
        if duration_days(start_date, end_date) < 1 {
            return Err(LeaveError::ZeroDuration);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            employee_id: input.employee_id,
            leave_type,
            start_date,
            end_date,
            reason: input.reason,
            status: LeaveStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        })
    }

    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    fn ensure_pending(&self) -> Result<(), LeaveError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(LeaveError::InvalidTransition)
        }
    }

    pub fn approve(&mut self) -> Result<(), LeaveError> {
        self.ensure_pending()?;
        self.status = LeaveStatus::Approved;
        Ok(())
    }

    pub fn reject(&mut self, reason: &str) -> Result<(), LeaveError> {
        self.ensure_pending()?;
        if reason.trim().is_empty() {
            return Err(LeaveError::MissingRejectionReason);
        }
        self.status = LeaveStatus::Rejected;
        self.rejection_reason = Some(reason.to_string());
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), LeaveError> {
        self.ensure_pending()?;
        self.status = LeaveStatus::Cancelled;
        Ok(())
    }
}

/// The employee dashboard's three tabs: pending, approved, and everything
/// else (rejected or cancelled).
#[derive(Debug, Default)]
pub struct StatusPartition {
    pub pending: Vec<LeaveRequest>,
    pub approved: Vec<LeaveRequest>,
    pub other: Vec<LeaveRequest>,
}

pub fn partition_by_status(requests: Vec<LeaveRequest>) -> StatusPartition {
    let mut partition = StatusPartition::default();
    for request in requests {
        match request.status {
            LeaveStatus::Pending => partition.pending.push(request),
            LeaveStatus::Approved => partition.approved.push(request),
            _ => partition.other.push(request),
        }
    }
    partition
}
