//! Employee repository interface

use async_trait::async_trait;

use super::model::{Employee, EmployeeFilter};
use crate::domain::DomainResult;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Save a new employee
    async fn save(&self, employee: Employee) -> DomainResult<()>;

    /// Find employee by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Employee>>;

    /// Employees matching the filter, ordered by name
    async fn find(&self, filter: &EmployeeFilter) -> DomainResult<Vec<Employee>>;
}
