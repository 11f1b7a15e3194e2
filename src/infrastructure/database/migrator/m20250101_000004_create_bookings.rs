//! Create bookings table
//!
//! Status moves forward only: pending -> confirmed | cancelled.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_accounts::Accounts;
use super::m20250101_000003_create_stations::Stations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::AccountId).string())
                    .col(ColumnDef::new(Bookings::StationId).integer().not_null())
                    .col(ColumnDef::new(Bookings::Phone).string().not_null())
                    .col(ColumnDef::new(Bookings::CarNumber).string().not_null())
                    .col(ColumnDef::new(Bookings::Hours).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::Slots)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Bookings::Amount).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_station")
                            .from(Bookings::Table, Bookings::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_account")
                            .from(Bookings::Table, Bookings::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_station")
                    .table(Bookings::Table)
                    .col(Bookings::StationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        // Expiry task scans pending bookings by age
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_created_at")
                    .table(Bookings::Table)
                    .col(Bookings::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    AccountId,
    StationId,
    Phone,
    CarNumber,
    Hours,
    Slots,
    Amount,
    Status,
    CreatedAt,
}
