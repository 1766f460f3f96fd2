//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::domain::hotel::{Hotel, HotelRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::hotel;

use super::db_err;

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        address: m.address,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn save(&self, h: Hotel) -> DomainResult<()> {
        debug!("Saving hotel: {}", h.id);

        let model = hotel::ActiveModel {
            id: Set(h.id),
            name: Set(h.name),
            address: Set(h.address),
            created_at: Set(h.created_at),
            updated_at: Set(h.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_desc(hotel::Column::CreatedAt)
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        hotel::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
