//! Employee service
//!
//! Employees are read-only over HTTP; `register` exists for seeding and
//! administrative tooling.

use std::sync::Arc;

use log::info;

use crate::domain::employee::{Employee, EmployeeFilter, NewEmployee};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct EmployeeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl EmployeeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> DomainResult<Vec<Employee>> {
        self.repos.employees().find(filter).await
    }

    pub async fn register(&self, input: NewEmployee) -> DomainResult<Employee> {
        if input.name.is_empty() {
            return Err(DomainError::invalid("name", "Employee name is required"));
        }
        if self.repos.hotels().find_by_id(&input.hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel", input.hotel_id));
        }

        let mut employee = Employee::new(input.hotel_id, input.name, input.role);
        employee.email = input.email;
        employee.phone = input.phone;
        employee.is_active = input.is_active;

        self.repos.employees().save(employee.clone()).await?;
        info!(
            "Employee registered: {} as {} in hotel {}",
            employee.name, employee.role, employee.hotel_id
        );
        Ok(employee)
    }
}
