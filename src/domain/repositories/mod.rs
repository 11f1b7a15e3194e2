//! Unified repository access
//!
//! One provider per storage backend (SeaORM, in-memory). Services
//! receive `Arc<dyn RepositoryProvider>` instead of a shared global
//! connection handle.

use crate::domain::account::AccountRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::station::StationRepository;

pub trait RepositoryProvider: Send + Sync {
    fn accounts(&self) -> &dyn AccountRepository;
    fn stations(&self) -> &dyn StationRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
