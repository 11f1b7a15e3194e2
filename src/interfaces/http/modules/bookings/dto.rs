//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Booking;

fn default_slots() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub station_id: i32,
    #[validate(length(min = 1, max = 20, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 20, message = "car_number is required"))]
    pub car_number: String,
    #[validate(range(min = 1, max = 24, message = "hours must be 1-24"))]
    pub hours: i32,
    /// Capacity units to reserve; defaults to 1
    #[serde(default = "default_slots")]
    #[validate(range(min = 1, max = 10, message = "slots must be 1-10"))]
    pub slots: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub account_id: Option<String>,
    pub station_id: i32,
    pub phone: String,
    pub car_number: String,
    pub hours: i32,
    pub slots: i32,
    pub amount: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            account_id: b.account_id,
            station_id: b.station_id,
            phone: b.phone,
            car_number: b.car_number,
            hours: b.hours,
            slots: b.slots,
            amount: b.amount,
            status: b.status.to_string(),
            created_at: b.created_at,
        }
    }
}
