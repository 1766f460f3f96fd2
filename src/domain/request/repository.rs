//! Guest request repository interface

use async_trait::async_trait;

use super::model::{GuestRequest, RequestStatus};
use super::query::{AssignedRequest, RequestQuery};
use crate::domain::DomainResult;
use crate::support::pagination::PaginatedResult;

#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Save a new request
    async fn save(&self, request: GuestRequest) -> DomainResult<()>;

    /// Find request by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<GuestRequest>>;

    /// Overwrite an existing request
    async fn update(&self, request: GuestRequest) -> DomainResult<()>;

    /// Delete a request. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> DomainResult<bool>;

    /// Filtered, sorted page joined with assignees, plus the unpaginated count
    async fn search(&self, query: &RequestQuery) -> DomainResult<PaginatedResult<AssignedRequest>>;

    /// Requests for an exact room number in a hotel, newest first
    async fn find_by_room(
        &self,
        hotel_id: &str,
        room_number: &str,
    ) -> DomainResult<Vec<AssignedRequest>>;

    /// Count requests of a hotel, optionally restricted to one status
    async fn count(&self, hotel_id: &str, status: Option<RequestStatus>) -> DomainResult<u64>;
}
