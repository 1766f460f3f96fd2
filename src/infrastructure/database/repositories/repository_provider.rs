//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::employee::EmployeeRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::request::RequestRepository;
use crate::domain::DomainResult;

use super::db_err;
use super::employee_repository::SeaOrmEmployeeRepository;
use super::hotel_repository::SeaOrmHotelRepository;
use super::request_repository::SeaOrmRequestRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let hotel = repos.hotels().find_by_id(&hotel_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    hotels: SeaOrmHotelRepository,
    employees: SeaOrmEmployeeRepository,
    requests: SeaOrmRequestRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            hotels: SeaOrmHotelRepository::new(db.clone()),
            employees: SeaOrmEmployeeRepository::new(db.clone()),
            requests: SeaOrmRequestRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn employees(&self) -> &dyn EmployeeRepository {
        &self.employees
    }

    fn requests(&self) -> &dyn RequestRepository {
        &self.requests
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
