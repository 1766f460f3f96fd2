//! Guest request entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guest_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub hotel_id: String,
    pub guest_name: String,

    #[sea_orm(nullable)]
    pub room_number: Option<String>,

    /// cleaning, slippers, late_checkout, towels, room_service, maintenance, other
    pub request_type: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    /// pending, in_progress, done
    pub status: String,

    /// low, medium, high
    pub priority: String,

    #[sea_orm(nullable)]
    pub assigned_to_id: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub estimated_completion: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::AssignedToId",
        to = "super::employee::Column::Id"
    )]
    AssignedTo,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedTo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
