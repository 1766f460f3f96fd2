//! Employee aggregate

pub mod model;
pub mod repository;

pub use model::{Employee, EmployeeFilter, EmployeeRole, NewEmployee};
pub use repository::EmployeeRepository;
