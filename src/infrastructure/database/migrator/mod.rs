//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_hotels;
mod m20250101_000002_create_employees;
mod m20250101_000003_create_guest_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_hotels::Migration),
            Box::new(m20250101_000002_create_employees::Migration),
            Box::new(m20250101_000003_create_guest_requests::Migration),
        ]
    }
}
