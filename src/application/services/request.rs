//! Guest request business logic service
//!
//! Owns the assignment rules and the status lifecycle. Handlers call into
//! this service and never reach the repositories directly.

use std::sync::Arc;

use log::info;

use crate::domain::employee::Employee;
use crate::domain::hotel::Hotel;
use crate::domain::request::{
    AssignedRequest, GuestRequest, NewGuestRequest, RequestChanges, RequestQuery, RequestStats,
    RequestStatus,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::support::pagination::PaginatedResult;

/// A request with its assignee and owning hotel.
#[derive(Debug, Clone)]
pub struct RequestDetail {
    pub request: GuestRequest,
    pub assigned_to: Option<Employee>,
    pub hotel: Hotel,
}

/// Service for guest request operations
pub struct RequestService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RequestService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, query: &RequestQuery) -> DomainResult<PaginatedResult<AssignedRequest>> {
        self.repos.requests().search(query).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<RequestDetail> {
        let request = self.load(id).await?;
        self.detail(request).await
    }

    /// Create a pending, unassigned request in an existing hotel.
    pub async fn create(&self, input: NewGuestRequest) -> DomainResult<AssignedRequest> {
        if input.guest_name.is_empty() {
            return Err(DomainError::invalid("guestName", "Guest name is required"));
        }
        if self.repos.hotels().find_by_id(&input.hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel", input.hotel_id));
        }

        let request = GuestRequest::new(input);
        self.repos.requests().save(request.clone()).await?;

        metrics::counter!(
            "guest_requests_created_total",
            "request_type" => request.request_type.as_str(),
            "priority" => request.priority.as_str()
        )
        .increment(1);
        info!(
            "Guest request created: {} ({} for room {}) in hotel {}",
            request.id,
            request.request_type,
            request.room_number.as_deref().unwrap_or("-"),
            request.hotel_id
        );

        Ok(AssignedRequest {
            request,
            assigned_to: None,
        })
    }

    /// Apply a partial update. A new non-null assignee goes through the
    /// same checks as [`RequestService::assign`].
    pub async fn update(&self, id: &str, changes: RequestChanges) -> DomainResult<RequestDetail> {
        let mut request = self.load(id).await?;

        if let Some(name) = &changes.guest_name {
            if name.is_empty() {
                return Err(DomainError::invalid("guestName", "Guest name is required"));
            }
        }
        if let Some(Some(employee_id)) = &changes.assigned_to_id {
            self.assignable_employee(employee_id, &request.hotel_id).await?;
        }

        let status_changed = changes.status.is_some_and(|s| s != request.status);
        request.apply(changes);
        self.repos.requests().update(request.clone()).await?;

        if status_changed {
            metrics::counter!("guest_request_status_changes_total", "status" => request.status.as_str())
                .increment(1);
        }
        info!("Guest request updated: {}", request.id);

        self.detail(request).await
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        if !self.repos.requests().delete(id).await? {
            return Err(DomainError::not_found("Request", id));
        }
        info!("Guest request deleted: {}", id);
        Ok(())
    }

    /// Set the status. Any of the three states is accepted from any other.
    pub async fn update_status(&self, id: &str, status: RequestStatus) -> DomainResult<AssignedRequest> {
        let mut request = self.load(id).await?;
        let previous = request.status;

        request.set_status(status);
        self.repos.requests().update(request.clone()).await?;

        metrics::counter!("guest_request_status_changes_total", "status" => status.as_str())
            .increment(1);
        info!("Guest request {} status: {} -> {}", request.id, previous, status);

        self.with_assignee(request).await
    }

    /// Assign an employee of the same hotel who is currently active.
    pub async fn assign(&self, id: &str, employee_id: &str) -> DomainResult<AssignedRequest> {
        let mut request = self.load(id).await?;
        let employee = self.assignable_employee(employee_id, &request.hotel_id).await?;

        request.assign_to(&employee.id);
        self.repos.requests().update(request.clone()).await?;

        metrics::counter!("guest_request_assignments_total").increment(1);
        info!("Guest request {} assigned to {} ({})", request.id, employee.name, employee.id);

        Ok(AssignedRequest {
            request,
            assigned_to: Some(employee),
        })
    }

    pub async fn stats(&self, hotel_id: &str) -> DomainResult<RequestStats> {
        let requests = self.repos.requests();
        Ok(RequestStats {
            pending: requests.count(hotel_id, Some(RequestStatus::Pending)).await?,
            in_progress: requests.count(hotel_id, Some(RequestStatus::InProgress)).await?,
            done: requests.count(hotel_id, Some(RequestStatus::Done)).await?,
            total: requests.count(hotel_id, None).await?,
        })
    }

    pub async fn by_room(&self, hotel_id: &str, room_number: &str) -> DomainResult<Vec<AssignedRequest>> {
        self.repos.requests().find_by_room(hotel_id, room_number).await
    }

    async fn load(&self, id: &str) -> DomainResult<GuestRequest> {
        self.repos
            .requests()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Request", id))
    }

    async fn assignable_employee(&self, employee_id: &str, hotel_id: &str) -> DomainResult<Employee> {
        let employee = self
            .repos
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", employee_id))?;
        employee.ensure_assignable_to(hotel_id)?;
        Ok(employee)
    }

    async fn with_assignee(&self, request: GuestRequest) -> DomainResult<AssignedRequest> {
        let assigned_to = match &request.assigned_to_id {
            Some(id) => self.repos.employees().find_by_id(id).await?,
            None => None,
        };
        Ok(AssignedRequest {
            request,
            assigned_to,
        })
    }

    async fn detail(&self, request: GuestRequest) -> DomainResult<RequestDetail> {
        let hotel = self
            .repos
            .hotels()
            .find_by_id(&request.hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", request.hotel_id.clone()))?;
        let AssignedRequest {
            request,
            assigned_to,
        } = self.with_assignee(request).await?;
        Ok(RequestDetail {
            request,
            assigned_to,
            hotel,
        })
    }
}
