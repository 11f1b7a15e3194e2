//! Domain layer: entities, status machines and repository interfaces

pub mod account;
pub mod booking;
pub mod error;
pub mod payment;
pub mod repositories;
pub mod station;

pub use account::{Account, AccountRepository, AccountRole};
pub use booking::{Booking, BookingDraft, BookingRepository, BookingStatus};
pub use error::{DomainError, DomainResult};
pub use payment::{Payment, PaymentDraft, PaymentRepository};
pub use repositories::RepositoryProvider;
pub use station::{NewStation, Station, StationRepository};
