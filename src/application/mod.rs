//! Application layer - use cases and background tasks

pub mod services;

pub use services::{
    start_booking_expiry_task, OtpGenerator, PaymentService, RandomOtpGenerator,
    RegistrationConfig, RegistrationService, ReservationService, ReserveRequest, Session,
};
