//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod account_repository;
pub mod booking_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod station_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
