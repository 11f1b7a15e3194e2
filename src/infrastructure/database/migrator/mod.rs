//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_companies;
mod m20250101_000002_create_accounts;
mod m20250101_000003_create_stations;
mod m20250101_000004_create_bookings;
mod m20250101_000005_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_companies::Migration),
            Box::new(m20250101_000002_create_accounts::Migration),
            Box::new(m20250101_000003_create_stations::Migration),
            Box::new(m20250101_000004_create_bookings::Migration),
            Box::new(m20250101_000005_create_payments::Migration),
        ]
    }
}
