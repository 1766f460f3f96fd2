//! Guest request aggregate
//!
//! Contains the request entity, its status machine, the list query model and
//! the repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{
    GuestRequest, NewGuestRequest, Priority, RequestChanges, RequestStats, RequestStatus,
    RequestType,
};
pub use query::{AssignedRequest, RequestFilter, RequestQuery, RequestSort, SortField, SortOrder};
pub use repository::RequestRepository;
