//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod employee_repository;
pub mod hotel_repository;
pub mod repository_provider;
pub mod request_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// A stored enum column holds a value the domain does not know.
pub(crate) fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::Storage(format!("Unexpected value '{}' in {}", value, column))
}
