//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Payment;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConfirmPaymentRequest {
    pub booking_id: i32,
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub booking_id: i32,
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            booking_id: p.booking_id,
            amount: p.amount,
            created_at: p.created_at,
        }
    }
}
