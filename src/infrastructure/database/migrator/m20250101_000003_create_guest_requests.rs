//! Create guest_requests table
//!
//! Requests are scoped by hotel and optionally point at an employee.
//! Deleting the employee leaves the request unassigned.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_hotels::Hotels;
use super::m20250101_000002_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuestRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuestRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GuestRequests::HotelId).string().not_null())
                    .col(ColumnDef::new(GuestRequests::GuestName).string().not_null())
                    .col(ColumnDef::new(GuestRequests::RoomNumber).string())
                    .col(ColumnDef::new(GuestRequests::RequestType).string().not_null())
                    .col(ColumnDef::new(GuestRequests::Description).text())
                    .col(
                        ColumnDef::new(GuestRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(GuestRequests::Priority)
                            .string()
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(GuestRequests::AssignedToId).string())
                    .col(
                        ColumnDef::new(GuestRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GuestRequests::EstimatedCompletion).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_requests_hotel")
                            .from(GuestRequests::Table, GuestRequests::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guest_requests_assigned_to")
                            .from(GuestRequests::Table, GuestRequests::AssignedToId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guest_requests_hotel_status")
                    .table(GuestRequests::Table)
                    .col(GuestRequests::HotelId)
                    .col(GuestRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guest_requests_hotel_room")
                    .table(GuestRequests::Table)
                    .col(GuestRequests::HotelId)
                    .col(GuestRequests::RoomNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guest_requests_assigned_to")
                    .table(GuestRequests::Table)
                    .col(GuestRequests::AssignedToId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuestRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum GuestRequests {
    Table,
    Id,
    HotelId,
    GuestName,
    RoomNumber,
    RequestType,
    Description,
    Status,
    Priority,
    AssignedToId,
    CreatedAt,
    UpdatedAt,
    EstimatedCompletion,
}
