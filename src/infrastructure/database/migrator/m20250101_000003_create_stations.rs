//! Create stations table
//!
//! `available_slots` is the contended capacity column; the booking
//! repository mutates it only through conditional updates.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stations::Name).string().not_null())
                    .col(ColumnDef::new(Stations::Address).string().not_null())
                    .col(ColumnDef::new(Stations::Latitude).double())
                    .col(ColumnDef::new(Stations::Longitude).double())
                    .col(ColumnDef::new(Stations::Phone).string())
                    .col(ColumnDef::new(Stations::OpeningTime).time().not_null())
                    .col(ColumnDef::new(Stations::ClosingTime).time().not_null())
                    .col(
                        ColumnDef::new(Stations::AvailableSlots)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Stations::RatePerHour)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Stations::CompanyId).integer())
                    .col(
                        ColumnDef::new(Stations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stations_company")
                            .from(Stations::Table, Stations::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stations {
    Table,
    Id,
    Name,
    Address,
    Latitude,
    Longitude,
    Phone,
    OpeningTime,
    ClosingTime,
    AvailableSlots,
    RatePerHour,
    CompanyId,
    CreatedAt,
}
