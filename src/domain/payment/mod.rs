//! Payment aggregate: model and repository interface

pub mod model;
pub mod repository;

pub use model::{Payment, PaymentDraft};
pub use repository::PaymentRepository;
