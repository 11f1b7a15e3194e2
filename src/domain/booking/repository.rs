//! Booking repository interface
//!
//! `reserve` and `cancel_and_release` are the only two places where
//! station capacity changes. Both must be atomic: the capacity
//! adjustment and the booking row change commit together or not at
//! all, and the capacity check-and-decrement must never be a plain
//! read-modify-write under concurrency.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Booking, BookingDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically decrement the station's available slots by
    /// `draft.slots` and insert the pending booking.
    ///
    /// Fails with `NoCapacity` when fewer slots remain than requested,
    /// leaving capacity untouched. Fails with `NotFound` when the
    /// station does not exist.
    async fn reserve(&self, draft: BookingDraft) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Atomically mark a pending booking cancelled and return its
    /// reserved slots to the station (compensating transaction).
    ///
    /// Fails with `NotFound` for unknown ids and `AlreadyTerminal`
    /// for bookings that are already confirmed or cancelled; neither
    /// failure changes capacity.
    async fn cancel_and_release(&self, booking_id: i32) -> DomainResult<Booking>;

    /// Pending bookings created before `cutoff` (expiry sweep)
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>>;

    /// List all bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;
}
