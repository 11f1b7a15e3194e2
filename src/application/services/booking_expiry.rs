//! Background task that cancels overdue pending bookings.
//!
//! Runs in a tokio::spawn loop. A pending booking older than the TTL
//! is treated as abandoned: it is cancelled through the same
//! compensating path as an explicit cancel, so its slots return to
//! the station.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::time;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

/// Start the booking expiry background task.
pub fn start_booking_expiry_task(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
    pending_ttl_minutes: i64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            pending_ttl_minutes, "📅 Booking expiry task started"
        );

        let mut interval = time::interval(time::Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = expire_pending_bookings(&repos, pending_ttl_minutes).await {
                        warn!(error = %e, "Booking expiry check error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("📅 Booking expiry task shutting down");
                    break;
                }
            }
        }

        info!("📅 Booking expiry task stopped");
    });
}

async fn expire_pending_bookings(
    repos: &Arc<dyn RepositoryProvider>,
    pending_ttl_minutes: i64,
) -> Result<(), DomainError> {
    let cutoff = Utc::now() - Duration::minutes(pending_ttl_minutes);
    let stale = repos.bookings().find_stale_pending(cutoff).await?;

    if stale.is_empty() {
        return Ok(());
    }

    info!(count = stale.len(), "Cancelling overdue pending bookings");

    for booking in stale {
        match repos.bookings().cancel_and_release(booking.id).await {
            Ok(_) => {}
            // Lost the race against a payment or an explicit cancel
            Err(DomainError::AlreadyTerminal { .. }) => {
                debug!(booking_id = booking.id, "Booking settled before expiry");
            }
            Err(e) => warn!(booking_id = booking.id, error = %e, "Failed to expire booking"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingDraft;
    use crate::domain::station::NewStation;
    use crate::domain::BookingStatus;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::NaiveTime;

    async fn seed_booking(repos: &InMemoryRepositoryProvider) -> (i32, i32) {
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
                available_slots: 1,
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
                hours: 1,
                slots: 1,
                amount: 5000,
            })
            .await
            .unwrap();
        (station.id, booking.id)
    }

    #[tokio::test]
    async fn stale_pending_booking_is_cancelled_and_slots_released() {
        let memory = Arc::new(InMemoryRepositoryProvider::new());
        let repos: Arc<dyn RepositoryProvider> = memory.clone();
        let (station_id, booking_id) = seed_booking(&memory).await;

        // TTL of zero minutes: the fresh booking is already stale
        expire_pending_bookings(&repos, 0).await.unwrap();

        let booking = memory
            .bookings()
            .find_by_id(booking_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        let station = memory
            .stations()
            .find_by_id(station_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(station.available_slots, 1);
    }

    #[tokio::test]
    async fn confirmed_booking_survives_expiry() {
        let memory = Arc::new(InMemoryRepositoryProvider::new());
        let repos: Arc<dyn RepositoryProvider> = memory.clone();
        let (_, booking_id) = seed_booking(&memory).await;

        memory
            .payments()
            .record(crate::domain::PaymentDraft {
                booking_id,
                amount: 5000,
            })
            .await
            .unwrap();

        expire_pending_bookings(&repos, 0).await.unwrap();

        let booking = memory
            .bookings()
            .find_by_id(booking_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }
}
