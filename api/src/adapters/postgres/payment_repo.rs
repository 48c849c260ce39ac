//! PostgreSQL adapter for PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{BookingId, Payment, PaymentMethod, PaymentStatus};
use crate::domain::ports::PaymentRepository;
use crate::entity::{bookings, payments};
use crate::error::DomainError;

use super::booking_repo::payment_from_model;

pub struct PostgresPaymentRepository {
    db: DatabaseConnection,
}

impl PostgresPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Payment>, DomainError> {
        let result = payments::Entity::find()
            .filter(payments::Column::BookingId.eq(booking_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(payment_from_model))
    }

    async fn upsert_pending(
        &self,
        booking_id: &BookingId,
        amount: i64,
        updated_by: &str,
    ) -> Result<(Payment, bool), DomainError> {
        let existing = payments::Entity::find()
            .filter(payments::Column::BookingId.eq(booking_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let now = Utc::now().fixed_offset();

        match existing {
            Some(model) => {
                let updated = payments::ActiveModel {
                    id: Set(model.id),
                    payment_status: Set(PaymentStatus::Pending.to_string()),
                    payment_amount: Set(amount),
                    updated_by: Set(Some(updated_by.to_string())),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok((payment_from_model(updated), false))
            }
            None => {
                let created = payments::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    booking_id: Set(booking_id.0),
                    payment_method: Set(PaymentMethod::Cod.to_string()),
                    payment_amount: Set(amount),
                    payment_status: Set(PaymentStatus::Pending.to_string()),
                    transaction_id: Set(None),
                    created_by: Set(updated_by.to_string()),
                    updated_by: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok((payment_from_model(created), true))
            }
        }
    }

    async fn set_status_synced(
        &self,
        booking_id: &BookingId,
        status: PaymentStatus,
        updated_by: &str,
    ) -> Result<bool, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let now = Utc::now().fixed_offset();

        // Conditional write: rows_affected is the change detector, so the
        // paid-transition notification cannot fire twice for one transition.
        let payment_update = payments::Entity::update_many()
            .col_expr(
                payments::Column::PaymentStatus,
                Expr::value(status.to_string()),
            )
            .col_expr(
                payments::Column::UpdatedBy,
                Expr::value(updated_by.to_string()),
            )
            .col_expr(payments::Column::UpdatedAt, Expr::value(now))
            .filter(payments::Column::BookingId.eq(booking_id.0))
            .filter(payments::Column::PaymentStatus.ne(status.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        bookings::Entity::update_many()
            .col_expr(
                bookings::Column::PaymentStatus,
                Expr::value(status.to_string()),
            )
            .col_expr(
                bookings::Column::UpdatedBy,
                Expr::value(updated_by.to_string()),
            )
            .col_expr(bookings::Column::UpdatedAt, Expr::value(now))
            .filter(bookings::Column::Id.eq(booking_id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(payment_update.rows_affected > 0)
    }

    async fn paid_revenue(&self) -> Result<i64, DomainError> {
        let paid = payments::Entity::find()
            .filter(payments::Column::PaymentStatus.eq(PaymentStatus::Paid.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(paid.iter().map(|p| p.payment_amount).sum())
    }
}
