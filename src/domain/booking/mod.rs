//! Booking aggregate: model and repository interface

pub mod model;
pub mod repository;

pub use model::{Booking, BookingDraft, BookingStatus};
pub use repository::BookingRepository;
