//! Reservation engine: slot booking with hard capacity guarantees
//!
//! The capacity check-and-decrement lives in the booking repository
//! as one atomic operation; this service adds the business checks
//! around it (station exists, open hours, pricing).

use std::sync::Arc;

use tracing::info;

use crate::domain::booking::{Booking, BookingDraft};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Reservation request, already validated at the transport layer.
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    /// Authenticated account, if any; guests book with `None`
    pub account_id: Option<String>,
    pub station_id: i32,
    pub phone: String,
    pub car_number: String,
    pub hours: i32,
    /// Capacity units to reserve, normally 1
    pub slots: i32,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Reserve slots at a station.
    ///
    /// Under concurrency at most `available_slots / slots` requests
    /// succeed; the rest get `NoCapacity`. The decrement and the
    /// pending-booking insert happen together or not at all.
    pub async fn reserve(&self, request: ReserveRequest) -> DomainResult<Booking> {
        if request.slots < 1 {
            return Err(DomainError::Validation(format!(
                "slots must be at least 1, got {}",
                request.slots
            )));
        }
        if request.hours < 1 {
            return Err(DomainError::Validation(format!(
                "hours must be at least 1, got {}",
                request.hours
            )));
        }

        let station = self
            .repos
            .stations()
            .find_by_id(request.station_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Station",
                field: "id",
                value: request.station_id.to_string(),
            })?;

        if !station.is_open_now() {
            return Err(DomainError::StationClosed(station.id));
        }

        let amount = request.hours * station.rate_per_hour;
        let draft = BookingDraft {
            account_id: request.account_id,
            station_id: request.station_id,
            phone: request.phone,
            car_number: request.car_number,
            hours: request.hours,
            slots: request.slots,
            amount,
        };

        let booking = self.repos.bookings().reserve(draft).await?;
        info!(
            booking_id = booking.id,
            station_id = booking.station_id,
            slots = booking.slots,
            amount = booking.amount,
            "Booking reserved"
        );
        Ok(booking)
    }

    /// Cancel a pending booking, returning its slots to the station.
    pub async fn cancel(&self, booking_id: i32) -> DomainResult<Booking> {
        let booking = self.repos.bookings().cancel_and_release(booking_id).await?;
        info!(
            booking_id,
            station_id = booking.station_id,
            slots = booking.slots,
            "Booking cancelled, slots released"
        );
        Ok(booking)
    }

    pub async fn get(&self, booking_id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::NewStation;
    use crate::domain::BookingStatus;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::{Duration, NaiveTime, Utc};

    fn always_open() -> (NaiveTime, NaiveTime) {
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        (t, t)
    }

    /// A window that excludes the current moment, whatever it is.
    fn closed_now() -> (NaiveTime, NaiveTime) {
        let open = (Utc::now() + Duration::hours(1)).time();
        let close = (Utc::now() + Duration::hours(2)).time();
        (open, close)
    }

    fn station(slots: i32, window: (NaiveTime, NaiveTime)) -> NewStation {
        NewStation {
            name: "Central".into(),
            address: "1 Main St".into(),
            latitude: None,
            longitude: None,
            phone: None,
            opening_time: window.0,
            closing_time: window.1,
            available_slots: slots,
            rate_per_hour: 5000,
            company_id: None,
        }
    }

    fn request(station_id: i32) -> ReserveRequest {
        ReserveRequest {
            account_id: None,
            station_id,
            phone: "+998900000000".into(),
            car_number: "01A001AA".into(),
            hours: 2,
            slots: 1,
        }
    }

    async fn setup(slots: i32, window: (NaiveTime, NaiveTime)) -> (Arc<InMemoryRepositoryProvider>, ReservationService, i32) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let created = repos.stations().create(station(slots, window)).await.unwrap();
        let service = ReservationService::new(repos.clone());
        (repos, service, created.id)
    }

    async fn remaining_slots(repos: &InMemoryRepositoryProvider, station_id: i32) -> i32 {
        repos
            .stations()
            .find_by_id(station_id)
            .await
            .unwrap()
            .unwrap()
            .available_slots
    }

    #[tokio::test]
    async fn reserve_prices_from_station_rate() {
        let (_repos, service, station_id) = setup(3, always_open()).await;
        let booking = service.reserve(request(station_id)).await.unwrap();
        assert_eq!(booking.amount, 2 * 5000);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let (_repos, service, _) = setup(3, always_open()).await;
        let err = service.reserve(request(999)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn closed_station_rejects_bookings() {
        let (repos, service, station_id) = setup(3, closed_now()).await;
        let err = service.reserve(request(station_id)).await.unwrap_err();
        assert!(matches!(err, DomainError::StationClosed(_)));
        // Capacity untouched
        assert_eq!(remaining_slots(&repos, station_id).await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_reserves_never_oversell() {
        const CAPACITY: i32 = 3;
        const CONTENDERS: usize = 8;

        let (repos, service, station_id) = setup(CAPACITY, always_open()).await;
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for _ in 0..CONTENDERS {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.reserve(request(station_id)).await
            }));
        }

        let mut successes = 0;
        let mut no_capacity = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(DomainError::NoCapacity { .. }) => no_capacity += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(successes, CAPACITY as usize);
        assert_eq!(no_capacity, CONTENDERS - CAPACITY as usize);
        assert_eq!(remaining_slots(&repos, station_id).await, 0);
    }

    #[tokio::test]
    async fn cancel_restores_capacity_exactly() {
        let (repos, service, station_id) = setup(1, always_open()).await;

        let booking = service.reserve(request(station_id)).await.unwrap();
        assert_eq!(remaining_slots(&repos, station_id).await, 0);

        // Out of capacity while the booking is live
        let err = service.reserve(request(station_id)).await.unwrap_err();
        assert!(matches!(err, DomainError::NoCapacity { .. }));

        let cancelled = service.cancel(booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(remaining_slots(&repos, station_id).await, 1);

        // And the slot is reservable again
        service.reserve(request(station_id)).await.unwrap();
    }

    #[tokio::test]
    async fn nonpositive_units_are_rejected_and_mint_nothing() {
        // A negative decrement would add capacity; the engine must
        // refuse before the store is touched.
        let (repos, service, station_id) = setup(0, always_open()).await;

        for slots in [0, -3] {
            let mut bad = request(station_id);
            bad.slots = slots;
            let err = service.reserve(bad).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }

        let mut bad = request(station_id);
        bad.hours = 0;
        let err = service.reserve(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert_eq!(remaining_slots(&repos, station_id).await, 0);
    }

    #[tokio::test]
    async fn cancel_unknown_booking_is_not_found() {
        let (_repos, service, _) = setup(1, always_open()).await;
        let err = service.cancel(999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn capacity_is_conserved_under_mixed_traffic() {
        const CAPACITY: i32 = 4;
        let (repos, service, station_id) = setup(CAPACITY, always_open()).await;
        let service = Arc::new(service);

        // Reserve-then-cancel churns in parallel with plain reserves
        let mut handles = Vec::new();
        for i in 0..12 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                match service.reserve(request(station_id)).await {
                    Ok(booking) if i % 2 == 0 => {
                        service.cancel(booking.id).await.unwrap();
                        0
                    }
                    Ok(_) => 1,
                    Err(DomainError::NoCapacity { .. }) => 0,
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }));
        }

        let mut live = 0;
        for handle in handles {
            live += handle.await.unwrap();
        }

        // Slots out + slots free must equal the original capacity
        assert_eq!(remaining_slots(&repos, station_id).await + live, CAPACITY);
    }
}
