//! Application services

mod booking_expiry;
mod otp;
mod payment;
mod registration;
mod reservation;

pub use booking_expiry::start_booking_expiry_task;
pub use otp::{OtpGenerator, RandomOtpGenerator};
pub use payment::PaymentService;
pub use registration::{RegistrationConfig, RegistrationService, Session};
pub use reservation::{ReservationService, ReserveRequest};
