//! In-memory repository provider
//!
//! Backs unit and service tests; no persistence. Capacity atomicity
//! comes from holding the station's map guard across the
//! check-and-decrement. A guard is never held across an operation on
//! the same map, and status flips gate every cross-map follow-up so
//! compensating updates apply exactly once.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::account::{Account, AccountRepository};
use crate::domain::booking::{Booking, BookingDraft, BookingRepository, BookingStatus};
use crate::domain::payment::{Payment, PaymentDraft, PaymentRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::{NewStation, Station, StationRepository};
use crate::domain::{DomainError, DomainResult};

/// All-in-one in-memory store implementing every repository trait.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    accounts: DashMap<String, Account>,
    stations: DashMap<i32, Station>,
    bookings: DashMap<i32, Booking>,
    payments: DashMap<i32, Payment>,
    next_station_id: AtomicI32,
    next_booking_id: AtomicI32,
    next_payment_id: AtomicI32,
    next_company_id: AtomicI32,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        self
    }

    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepositoryProvider {
    async fn save(&self, account: Account) -> DomainResult<Account> {
        self.accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get(id).map(|a| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.clone()))
    }

    async fn update(&self, account: Account) -> DomainResult<()> {
        if !self.accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: account.id,
            });
        }
        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.accounts.len() as u64)
    }
}

#[async_trait]
impl StationRepository for InMemoryRepositoryProvider {
    async fn create(&self, s: NewStation) -> DomainResult<Station> {
        let id = self.next_station_id.fetch_add(1, Ordering::SeqCst) + 1;
        let station = Station {
            id,
            name: s.name,
            address: s.address,
            latitude: s.latitude,
            longitude: s.longitude,
            phone: s.phone,
            opening_time: s.opening_time,
            closing_time: s.closing_time,
            available_slots: s.available_slots,
            rate_per_hour: s.rate_per_hour,
            company_id: s.company_id,
            created_at: Utc::now(),
        };
        self.stations.insert(id, station.clone());
        Ok(station)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(&id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let mut all: Vec<Station> = self.stations.iter().map(|s| s.clone()).collect();
        all.sort_by_key(|s| s.id);
        Ok(all)
    }

    async fn create_company(
        &self,
        _name: String,
        _contact_email: Option<String>,
    ) -> DomainResult<i32> {
        Ok(self.next_company_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositoryProvider {
    async fn reserve(&self, draft: BookingDraft) -> DomainResult<Booking> {
        // Guard held across check + decrement: the capacity gate
        {
            let mut station =
                self.stations
                    .get_mut(&draft.station_id)
                    .ok_or(DomainError::NotFound {
                        entity: "Station",
                        field: "id",
                        value: draft.station_id.to_string(),
                    })?;
            if station.available_slots < draft.slots {
                return Err(DomainError::NoCapacity {
                    station_id: draft.station_id,
                    requested: draft.slots,
                });
            }
            station.available_slots -= draft.slots;
        }

        let id = self.next_booking_id.fetch_add(1, Ordering::SeqCst) + 1;
        let booking = draft.into_booking(id, Utc::now());
        self.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn cancel_and_release(&self, booking_id: i32) -> DomainResult<Booking> {
        // Flip first under the booking guard; the flip is the gate, so
        // the release below runs at most once per booking.
        let cancelled = {
            let mut booking =
                self.bookings
                    .get_mut(&booking_id)
                    .ok_or(DomainError::NotFound {
                        entity: "Booking",
                        field: "id",
                        value: booking_id.to_string(),
                    })?;
            if booking.status.is_terminal() {
                return Err(DomainError::AlreadyTerminal {
                    booking_id,
                    status: booking.status.to_string(),
                });
            }
            booking.status = BookingStatus::Cancelled;
            booking.clone()
        };

        if let Some(mut station) = self.stations.get_mut(&cancelled.station_id) {
            station.available_slots += cancelled.slots;
        }
        Ok(cancelled)
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending && b.created_at < cutoff)
            .map(|b| b.clone())
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|b| b.clone()).collect();
        all.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(all)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepositoryProvider {
    async fn record(&self, draft: PaymentDraft) -> DomainResult<Payment> {
        if self
            .payments
            .iter()
            .any(|p| p.booking_id == draft.booking_id)
        {
            return Err(DomainError::AlreadyPaid(draft.booking_id));
        }

        // Pending -> confirmed flip gates the payment insert
        {
            let mut booking =
                self.bookings
                    .get_mut(&draft.booking_id)
                    .ok_or(DomainError::NotFound {
                        entity: "Booking",
                        field: "id",
                        value: draft.booking_id.to_string(),
                    })?;
            if booking.status.is_terminal() {
                return Err(DomainError::AlreadyTerminal {
                    booking_id: draft.booking_id,
                    status: booking.status.to_string(),
                });
            }
            booking.status = BookingStatus::Confirmed;
        }

        let id = self.next_payment_id.fetch_add(1, Ordering::SeqCst) + 1;
        let payment = Payment {
            id,
            booking_id: draft.booking_id,
            amount: draft.amount,
            created_at: Utc::now(),
        };
        self.payments.insert(id, payment.clone());
        Ok(payment)
    }

    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>> {
        Ok(self
            .payments
            .iter()
            .find(|p| p.booking_id == booking_id)
            .map(|p| p.clone()))
    }
}
