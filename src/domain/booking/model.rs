//! Booking domain entity

use chrono::{DateTime, Utc};

/// Booking status
///
/// Transitions are monotonic forward: `Pending → Confirmed` via the
/// payment gate, `Pending → Cancelled` via the explicit cancel path.
/// Confirmed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Slot reserved, capacity already decremented, awaiting payment
    Pending,
    /// Payment recorded
    Confirmed,
    /// Cancelled; reserved slots returned to the station
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Slot booking at a charging station
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    /// Booking account; `None` for guest bookings
    pub account_id: Option<String>,
    pub station_id: i32,
    pub phone: String,
    pub car_number: String,
    /// Requested charge duration in hours
    pub hours: i32,
    /// Reserved capacity units (normally 1)
    pub slots: i32,
    /// Computed price, minor currency units
    pub amount: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Booking payload before the store assigns an id.
///
/// Inserting a draft and decrementing station capacity is a single
/// atomic operation on the booking repository.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub account_id: Option<String>,
    pub station_id: i32,
    pub phone: String,
    pub car_number: String,
    pub hours: i32,
    pub slots: i32,
    pub amount: i32,
}

impl BookingDraft {
    pub fn into_booking(self, id: i32, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            account_id: self.account_id,
            station_id: self.station_id,
            phone: self.phone,
            car_number: self.car_number,
            hours: self.hours,
            slots: self.slots,
            amount: self.amount,
            status: BookingStatus::Pending,
            created_at,
        }
    }
}
