//! Payment domain entity

use chrono::{DateTime, Utc};

/// Recorded payment for a booking. Immutable once written; at most
/// one payment exists per booking.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    /// Paid amount, minor currency units
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

/// Payment payload before the store assigns an id.
#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub booking_id: i32,
    pub amount: i32,
}
