//! SeaORM implementation of BookingRepository
//!
//! Capacity correctness lives here: the slot decrement is a
//! conditional UPDATE guarded by `available_slots >= n`, executed in
//! the same transaction as the booking row change. Zero rows affected
//! means another writer won the race and the transaction aborts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::booking::{Booking, BookingDraft, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, station};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        account_id: m.account_id,
        station_id: m.station_id,
        phone: m.phone,
        car_number: m.car_number,
        hours: m.hours,
        slots: m.slots,
        amount: m.amount,
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn reserve(&self, draft: BookingDraft) -> DomainResult<Booking> {
        debug!(
            "Reserving {} slot(s) at station {}",
            draft.slots, draft.station_id
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let decrement = station::Entity::update_many()
            .col_expr(
                station::Column::AvailableSlots,
                Expr::col(station::Column::AvailableSlots).sub(draft.slots),
            )
            .filter(station::Column::Id.eq(draft.station_id))
            .filter(station::Column::AvailableSlots.gte(draft.slots))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if decrement.rows_affected == 0 {
            // Either the station is gone or it is out of capacity
            let exists = station::Entity::find_by_id(draft.station_id)
                .one(&txn)
                .await
                .map_err(db_err)?
                .is_some();
            txn.rollback().await.map_err(db_err)?;

            return Err(if exists {
                DomainError::NoCapacity {
                    station_id: draft.station_id,
                    requested: draft.slots,
                }
            } else {
                DomainError::NotFound {
                    entity: "Station",
                    field: "id",
                    value: draft.station_id.to_string(),
                }
            });
        }

        let model = booking::ActiveModel {
            id: NotSet,
            account_id: Set(draft.account_id),
            station_id: Set(draft.station_id),
            phone: Set(draft.phone),
            car_number: Set(draft.car_number),
            hours: Set(draft.hours),
            slots: Set(draft.slots),
            amount: Set(draft.amount),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn cancel_and_release(&self, booking_id: i32) -> DomainResult<Booking> {
        debug!("Cancelling booking: {}", booking_id);

        let txn = self.db.begin().await.map_err(db_err)?;

        // Only a pending booking can flip to cancelled
        let flip = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Cancelled.as_str()),
            )
            .filter(booking::Column::Id.eq(booking_id))
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if flip.rows_affected == 0 {
            let existing = booking::Entity::find_by_id(booking_id)
                .one(&txn)
                .await
                .map_err(db_err)?;
            txn.rollback().await.map_err(db_err)?;

            return Err(match existing {
                None => DomainError::NotFound {
                    entity: "Booking",
                    field: "id",
                    value: booking_id.to_string(),
                },
                Some(b) => DomainError::AlreadyTerminal {
                    booking_id,
                    status: b.status,
                },
            });
        }

        let cancelled = booking::Entity::find_by_id(booking_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::Storage("booking vanished mid-transaction".into()))?;

        // Compensating increment returns the reserved units
        station::Entity::update_many()
            .col_expr(
                station::Column::AvailableSlots,
                Expr::col(station::Column::AvailableSlots).add(cancelled.slots),
            )
            .filter(station::Column::Id.eq(cancelled.station_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(cancelled))
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .filter(booking::Column::CreatedAt.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
