//! Payment repository interface

use async_trait::async_trait;

use super::model::{Payment, PaymentDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Atomically insert the payment and flip its pending booking to
    /// confirmed. Fails with `AlreadyPaid` if a payment already
    /// exists for the booking and `AlreadyTerminal` if the booking is
    /// cancelled; station capacity is never touched.
    async fn record(&self, draft: PaymentDraft) -> DomainResult<Payment>;

    /// Find the payment for a booking, if any
    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>>;
}
