//! SeaORM entity definitions

pub mod account;
pub mod booking;
pub mod company;
pub mod payment;
pub mod station;
