//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::employee::EmployeeRepository;
use super::hotel::HotelRepository;
use super::request::RequestRepository;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let hotel = repos.hotels().find_by_id("…").await?;
///     let page = repos.requests().search(&query).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn hotels(&self) -> &dyn HotelRepository;
    fn employees(&self) -> &dyn EmployeeRepository;
    fn requests(&self) -> &dyn RequestRepository;

    /// Round-trip to the backing store, used by the health check
    async fn ping(&self) -> DomainResult<()>;
}
