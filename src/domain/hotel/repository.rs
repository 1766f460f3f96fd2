//! Hotel repository interface

use async_trait::async_trait;

use super::model::Hotel;
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Save a new hotel
    async fn save(&self, hotel: Hotel) -> DomainResult<()>;

    /// Find hotel by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Hotel>>;

    /// All hotels, newest first
    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    async fn count(&self) -> DomainResult<u64>;
}
