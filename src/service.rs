use std::sync::Arc;

use crate::error::LeaveError;
use crate::model::leave_request::{
    CreateLeave, LeaveRequest, StatusPartition, partition_by_status,
};
use crate::store::LeaveStore;

/// Owns the leave request lifecycle: validation on submit, the pending ->
/// approved/rejected/cancelled transitions, and the query views behind the
/// employee and manager dashboards. Authorization stays with the caller;
/// this layer enforces only the state machine.
pub struct LeaveService {
    store: Arc<dyn LeaveStore>,
}

impl LeaveService {
    pub fn new(store: Arc<dyn LeaveStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CreateLeave) -> Result<LeaveRequest, LeaveError> {
        let request = LeaveRequest::new(input)?;
        self.store.insert(&request).await?;
        tracing::info!(
            id = %request.id,
            employee_id = %request.employee_id,
            days = request.duration_days(),
            "Leave request submitted"
        );
        Ok(request)
    }

    pub async fn get(&self, id: &str) -> Result<LeaveRequest, LeaveError> {
        self.store.get(id).await?.ok_or(LeaveError::NotFound)
    }

    pub async fn approve(&self, id: &str) -> Result<LeaveRequest, LeaveError> {
        let mut request = self.get(id).await?;
        request.approve()?;
        self.commit(request).await
    }

    pub async fn reject(&self, id: &str, reason: &str) -> Result<LeaveRequest, LeaveError> {
        let mut request = self.get(id).await?;
        request.reject(reason)?;
        self.commit(request).await
    }

    pub async fn cancel(&self, id: &str) -> Result<LeaveRequest, LeaveError> {
        let mut request = self.get(id).await?;
        request.cancel()?;
        self.commit(request).await
    }

    /// Writes a settled record back. The store only accepts the write while
    /// the row is still pending, so the loser of a concurrent decision
    /// observes the same failure as a stale caller.
    async fn commit(&self, request: LeaveRequest) -> Result<LeaveRequest, LeaveError> {
        if !self.store.transition(&request).await? {
            return Err(LeaveError::InvalidTransition);
        }
        tracing::info!(id = %request.id, status = %request.status, "Leave request updated");
        Ok(request)
    }

    pub async fn list_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError> {
        Ok(self.store.list_by_employee(employee_id).await?)
    }

    /// The manager queue. Scoped tenant-wide, not per manager or department.
    pub async fn list_pending_for_manager(&self) -> Result<Vec<LeaveRequest>, LeaveError> {
        Ok(self.store.list_pending().await?)
    }

    pub async fn partition_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<StatusPartition, LeaveError> {
        let requests = self.list_by_employee(employee_id).await?;
        Ok(partition_by_status(requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveStatus;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn service() -> LeaveService {
        LeaveService::new(Arc::new(MemoryStore::new()))
    }

    fn input(employee_id: &str, start: &str, end: &str, leave_type: &str) -> CreateLeave {
        CreateLeave {
            employee_id: employee_id.to_string(),
            start_date: start.parse::<NaiveDate>().ok(),
            end_date: end.parse::<NaiveDate>().ok(),
            leave_type: leave_type.to_string(),
            reason: None,
        }
    }

    #[actix_web::test]
    async fn created_request_is_visible_to_both_views() {
        let service = service();
        let request = service
            .create(input("e1", "2025-05-01", "2025-05-05", "vacation"))
            .await
            .unwrap();

        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.duration_days(), 5);

        let mine = service.list_by_employee("e1").await.unwrap();
        assert!(mine.iter().any(|r| r.id == request.id));

        let queue = service.list_pending_for_manager().await.unwrap();
        assert!(queue.iter().any(|r| r.id == request.id));
    }

    #[actix_web::test]
    async fn create_validation_failures_store_nothing() {
        let service = service();

        let err = service
            .create(input("e1", "2025-05-10", "2025-05-05", "vacation"))
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::EndBeforeStart));

        let err = service
            .create(input("e1", "2025-05-01", "2025-05-05", "sabbatical"))
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::InvalidLeaveType));

        assert!(service.list_by_employee("e1").await.unwrap().is_empty());
        assert!(service.list_pending_for_manager().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn approve_is_not_repeatable() {
        let service = service();
        let request = service
            .create(input("e1", "2025-05-01", "2025-05-02", "sick"))
            .await
            .unwrap();

        let approved = service.approve(&request.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        let err = service.approve(&request.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::InvalidTransition));

        // The stored record is unchanged by the failed second attempt.
        let stored = service.get(&request.id).await.unwrap();
        assert_eq!(stored.status, LeaveStatus::Approved);
    }

    #[actix_web::test]
    async fn reject_stores_the_reason_and_blocks_later_decisions() {
        let service = service();
        let request = service
            .create(input("e1", "2025-05-01", "2025-05-05", "vacation"))
            .await
            .unwrap();

        let err = service.reject(&request.id, "  ").await.unwrap_err();
        assert!(matches!(err, LeaveError::MissingRejectionReason));
        assert!(service.get(&request.id).await.unwrap().is_pending());

        let rejected = service
            .reject(&request.id, "Coverage unavailable")
            .await
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Coverage unavailable")
        );

        let err = service.approve(&request.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::InvalidTransition));
        let err = service.cancel(&request.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::InvalidTransition));
    }

    #[actix_web::test]
    async fn cancel_only_works_while_pending() {
        let service = service();
        let request = service
            .create(input("e1", "2025-06-15", "2025-06-18", "personal"))
            .await
            .unwrap();

        let cancelled = service.cancel(&request.id).await.unwrap();
        assert_eq!(cancelled.status, LeaveStatus::Cancelled);

        let err = service.cancel(&request.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::InvalidTransition));
    }

    #[actix_web::test]
    async fn unknown_id_is_not_found() {
        let service = service();
        assert!(matches!(
            service.approve("missing").await.unwrap_err(),
            LeaveError::NotFound
        ));
        assert!(matches!(
            service.reject("missing", "because").await.unwrap_err(),
            LeaveError::NotFound
        ));
        assert!(matches!(
            service.cancel("missing").await.unwrap_err(),
            LeaveError::NotFound
        ));
    }

    #[actix_web::test]
    async fn settled_requests_leave_the_manager_queue() {
        let service = service();
        let first = service
            .create(input("e1", "2025-05-01", "2025-05-05", "vacation"))
            .await
            .unwrap();
        let second = service
            .create(input("e2", "2025-05-15", "2025-05-18", "sick"))
            .await
            .unwrap();

        service.approve(&first.id).await.unwrap();

        let queue = service.list_pending_for_manager().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, second.id);
    }

    #[actix_web::test]
    async fn partition_mirrors_the_dashboard_tabs() {
        let service = service();
        let pending = service
            .create(input("e1", "2025-05-01", "2025-05-05", "vacation"))
            .await
            .unwrap();
        let approved = service
            .create(input("e1", "2025-06-15", "2025-06-18", "sick"))
            .await
            .unwrap();
        let rejected = service
            .create(input("e1", "2025-07-10", "2025-07-10", "personal"))
            .await
            .unwrap();
        service
            .create(input("e2", "2025-07-10", "2025-07-10", "personal"))
            .await
            .unwrap();

        service.approve(&approved.id).await.unwrap();
        service.reject(&rejected.id, "Understaffed").await.unwrap();

        let partition = service.partition_for_employee("e1").await.unwrap();
        assert_eq!(partition.pending.len(), 1);
        assert_eq!(partition.pending[0].id, pending.id);
        assert_eq!(partition.approved.len(), 1);
        assert_eq!(partition.other.len(), 1);
        assert_eq!(partition.other[0].id, rejected.id);
    }

    #[actix_web::test]
    async fn end_to_end_reject_flow() {
        let service = service();
        let request = service
            .create(input("e1", "2025-05-01", "2025-05-05", "vacation"))
            .await
            .unwrap();
        assert_eq!(request.duration_days(), 5);

        let queue = service.list_pending_for_manager().await.unwrap();
        assert!(queue.iter().any(|r| r.id == request.id));

        let rejected = service
            .reject(&request.id, "Coverage unavailable")
            .await
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Coverage unavailable")
        );

        assert!(matches!(
            service.approve(&request.id).await.unwrap_err(),
            LeaveError::InvalidTransition
        ));
    }
}
