//! Application services

mod employee;
mod hotel;
mod request;

pub use employee::EmployeeService;
pub use hotel::HotelService;
pub use request::{RequestDetail, RequestService};
