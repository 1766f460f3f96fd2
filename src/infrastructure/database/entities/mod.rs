//! Database entities module

pub mod employee;
pub mod guest_request;
pub mod hotel;

pub use employee::Entity as Employee;
pub use guest_request::Entity as GuestRequest;
pub use hotel::Entity as Hotel;
