//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::booking::BookingStatus;
use crate::domain::payment::{Payment, PaymentDraft, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, payment};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        booking_id: m.booking_id,
        amount: m.amount,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn record(&self, draft: PaymentDraft) -> DomainResult<Payment> {
        debug!("Recording payment for booking: {}", draft.booking_id);

        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(draft.booking_id))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::AlreadyPaid(draft.booking_id));
        }

        // Only a pending booking can be confirmed
        let flip = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Confirmed.as_str()),
            )
            .filter(booking::Column::Id.eq(draft.booking_id))
            .filter(booking::Column::Status.eq(BookingStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if flip.rows_affected == 0 {
            let found = booking::Entity::find_by_id(draft.booking_id)
                .one(&txn)
                .await
                .map_err(db_err)?;
            txn.rollback().await.map_err(db_err)?;

            return Err(match found {
                None => DomainError::NotFound {
                    entity: "Booking",
                    field: "id",
                    value: draft.booking_id.to_string(),
                },
                Some(b) => DomainError::AlreadyTerminal {
                    booking_id: draft.booking_id,
                    status: b.status,
                },
            });
        }

        let model = payment::ActiveModel {
            id: NotSet,
            booking_id: Set(draft.booking_id),
            amount: Set(draft.amount),
            created_at: Set(Utc::now()),
        };
        // The unique index on booking_id backstops the existence check
        let saved = model.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
