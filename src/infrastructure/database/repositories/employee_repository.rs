//! SeaORM implementation of EmployeeRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::employee::{Employee, EmployeeFilter, EmployeeRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::employee;

use super::{corrupt, db_err};

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: employee::Model) -> DomainResult<Employee> {
    Ok(Employee {
        role: m.role.parse().map_err(|_| corrupt("employees.role", &m.role))?,
        id: m.id,
        hotel_id: m.hotel_id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn save(&self, e: Employee) -> DomainResult<()> {
        debug!("Saving employee: {} ({})", e.id, e.role);

        let model = employee::ActiveModel {
            id: Set(e.id),
            hotel_id: Set(e.hotel_id),
            name: Set(e.name),
            role: Set(e.role.as_str().to_string()),
            email: Set(e.email),
            phone: Set(e.phone),
            is_active: Set(e.is_active),
            created_at: Set(e.created_at),
            updated_at: Set(e.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find(&self, filter: &EmployeeFilter) -> DomainResult<Vec<Employee>> {
        let mut query =
            employee::Entity::find().filter(employee::Column::HotelId.eq(filter.hotel_id.as_str()));
        if let Some(role) = filter.role {
            query = query.filter(employee::Column::Role.eq(role.as_str()));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(employee::Column::IsActive.eq(active));
        }

        let models = query
            .order_by_asc(employee::Column::Name)
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
