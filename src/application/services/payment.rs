//! Payment gate: idempotent booking confirmation
//!
//! Confirming a booking records the payment and flips the status in
//! one step. A second confirmation is rejected, never double-charged;
//! station capacity is never touched here.

use std::sync::Arc;

use tracing::info;

use crate::domain::payment::{Payment, PaymentDraft};
use crate::domain::{DomainResult, RepositoryProvider};

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Record payment for a pending booking and confirm it.
    pub async fn confirm(&self, booking_id: i32, amount: i32) -> DomainResult<Payment> {
        let payment = self
            .repos
            .payments()
            .record(PaymentDraft { booking_id, amount })
            .await?;

        info!(
            booking_id,
            payment_id = payment.id,
            amount,
            "Payment recorded, booking confirmed"
        );
        Ok(payment)
    }

    pub async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>> {
        self.repos.payments().find_by_booking(booking_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingDraft;
    use crate::domain::station::NewStation;
    use crate::domain::{BookingStatus, DomainError};
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::NaiveTime;

    async fn setup_with_pending_booking() -> (Arc<InMemoryRepositoryProvider>, PaymentService, i32)
    {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let station = repos
            .stations()
            .create(NewStation {
                name: "Central".into(),
                address: "1 Main St".into(),
                latitude: None,
                longitude: None,
                phone: None,
                opening_time: t,
                closing_time: t,
                available_slots: 2,
                rate_per_hour: 5000,
                company_id: None,
            })
            .await
            .unwrap();
        let booking = repos
            .bookings()
            .reserve(BookingDraft {
                account_id: None,
                station_id: station.id,
                phone: "+998900000000".into(),
                car_number: "01A001AA".into(),
                hours: 2,
                slots: 1,
                amount: 10000,
            })
            .await
            .unwrap();
        let service = PaymentService::new(repos.clone());
        (repos, service, booking.id)
    }

    #[tokio::test]
    async fn confirm_flips_booking_and_records_payment() {
        let (repos, service, booking_id) = setup_with_pending_booking().await;

        let payment = service.confirm(booking_id, 10000).await.unwrap();
        assert_eq!(payment.booking_id, booking_id);
        assert_eq!(payment.amount, 10000);

        let booking = repos
            .bookings()
            .find_by_id(booking_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn second_confirm_is_already_paid_with_one_row() {
        let (_repos, service, booking_id) = setup_with_pending_booking().await;

        service.confirm(booking_id, 10000).await.unwrap();
        let err = service.confirm(booking_id, 10000).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyPaid(_)));

        let payment = service.find_by_booking(booking_id).await.unwrap().unwrap();
        assert_eq!(payment.amount, 10000);
    }

    #[tokio::test]
    async fn cancelled_booking_cannot_be_paid() {
        let (repos, service, booking_id) = setup_with_pending_booking().await;

        repos.bookings().cancel_and_release(booking_id).await.unwrap();
        let err = service.confirm(booking_id, 10000).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyTerminal { .. }));
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let (_repos, service, _) = setup_with_pending_booking().await;
        let err = service.confirm(999, 10000).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
