pub mod employee;
pub mod hotel;
pub mod repositories;
pub mod request;

// Re-export commonly used types
pub use employee::{Employee, EmployeeFilter, EmployeeRole, NewEmployee};
pub use hotel::{Hotel, NewHotel};
pub use repositories::{DomainResult, RepositoryProvider};
pub use request::{
    AssignedRequest, GuestRequest, NewGuestRequest, Priority, RequestChanges, RequestFilter,
    RequestQuery, RequestSort, RequestStats, RequestStatus, RequestType, SortField, SortOrder,
};

// Re-export DomainError from support for convenience
pub use crate::support::errors::DomainError;
