//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::account::AccountRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::StationRepository;

use super::account_repository::SeaOrmAccountRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::station_repository::SeaOrmStationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let station = repos.stations().find_by_id(1).await?;
/// let booking = repos.bookings().find_by_id(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    accounts: SeaOrmAccountRepository,
    stations: SeaOrmStationRepository,
    bookings: SeaOrmBookingRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: SeaOrmAccountRepository::new(db.clone()),
            stations: SeaOrmStationRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
