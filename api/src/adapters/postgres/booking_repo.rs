//! PostgreSQL adapter for BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    Booking, BookingId, Client, ClientId, NewBooking, NewClient, OrderStatus, Payment, PaymentId,
    PaymentMethod, PaymentStatus,
};
use crate::domain::ports::{BookingRepository, UpdateBooking};
use crate::entity::{bookings, clients, payments};
use crate::error::DomainError;

use super::client_repo::client_active_model;

pub struct PostgresBookingRepository {
    db: DatabaseConnection,
}

impl PostgresBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<bookings::Model> for Booking {
    fn from(m: bookings::Model) -> Self {
        Booking {
            id: BookingId(m.id),
            client_id: ClientId(m.client_id),
            order_id: m.order_id,
            order_date: m.order_date.map(|d| d.with_timezone(&Utc)),
            dispatch_date: m.dispatch_date,
            shipping_method: m.shipping_method,
            selected_items: m.selected_items,
            order_status: m.order_status.parse().unwrap_or(OrderStatus::Booked),
            payment_status: m.payment_status.parse().unwrap_or(PaymentStatus::Pending),
            total_price: m.total_price,
            is_gift: m.is_gift,
            created_by: m.created_by,
            updated_by: m.updated_by,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

pub(crate) fn payment_from_model(m: payments::Model) -> Payment {
    Payment {
        id: PaymentId(m.id),
        booking_id: BookingId(m.booking_id),
        payment_method: m.payment_method.parse().unwrap_or(PaymentMethod::Cod),
        payment_amount: m.payment_amount,
        payment_status: m.payment_status.parse().unwrap_or(PaymentStatus::Pending),
        transaction_id: m.transaction_id,
        created_by: m.created_by,
        updated_by: m.updated_by,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let result = bookings::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, DomainError> {
        let result = bookings::Entity::find()
            .filter(bookings::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_order_id_and_phone(
        &self,
        order_id: &str,
        phone: &str,
    ) -> Result<Option<Booking>, DomainError> {
        let booking = match self.find_by_order_id(order_id).await? {
            Some(b) => b,
            None => return Ok(None),
        };

        let client = clients::Entity::find_by_id(booking.client_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match client {
            Some(c) if c.phone == phone => Ok(Some(booking)),
            _ => Ok(None),
        }
    }

    async fn create_with_client(
        &self,
        client: &NewClient,
        booking: &NewBooking,
        order_id: &str,
        payment_amount: i64,
        transaction_id: Option<i64>,
        created_by: &str,
    ) -> Result<(Client, Booking, Payment), DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if let Some(txid) = transaction_id {
            let duplicate = payments::Entity::find()
                .filter(payments::Column::TransactionId.eq(txid))
                .one(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            if duplicate.is_some() {
                return Err(DomainError::AlreadyExists(
                    "Transaction ID already exists.".to_string(),
                ));
            }
        }

        let client_model = client_active_model(client, created_by)
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let now = Utc::now().fixed_offset();
        let booking_model = bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_model.id),
            order_id: Set(order_id.to_string()),
            order_date: Set(booking.order_date.map(|d| d.fixed_offset())),
            dispatch_date: Set(booking.dispatch_date),
            shipping_method: Set(booking
                .shipping_method
                .clone()
                .unwrap_or_else(|| "standard".to_string())),
            selected_items: Set(booking
                .selected_items
                .clone()
                .unwrap_or_else(|| serde_json::json!({}))),
            order_status: Set(OrderStatus::Booked.to_string()),
            payment_status: Set(PaymentStatus::AdvancePaid.to_string()),
            total_price: Set(booking.total_price),
            is_gift: Set(booking.is_gift),
            created_by: Set(created_by.to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        let method = if transaction_id.is_some() {
            PaymentMethod::Card
        } else {
            PaymentMethod::Cod
        };
        let payment_model = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking_model.id),
            payment_method: Set(method.to_string()),
            payment_amount: Set(payment_amount),
            payment_status: Set(PaymentStatus::AdvancePaid.to_string()),
            transaction_id: Set(transaction_id),
            created_by: Set(created_by.to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((
            client_model.into(),
            booking_model.into(),
            payment_from_model(payment_model),
        ))
    }

    async fn set_dispatch(
        &self,
        id: &BookingId,
        order_date: DateTime<Utc>,
        dispatch_date: NaiveTime,
        updated_by: &str,
    ) -> Result<Booking, DomainError> {
        let result = bookings::ActiveModel {
            id: Set(id.0),
            order_date: Set(Some(order_date.fixed_offset())),
            dispatch_date: Set(Some(dispatch_date)),
            updated_by: Set(Some(updated_by.to_string())),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &BookingId,
        changes: &UpdateBooking,
        updated_by: &str,
    ) -> Result<Booking, DomainError> {
        let mut model = bookings::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(updated_by.to_string())),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        if let Some(status) = changes.order_status {
            model.order_status = Set(status.to_string());
        }
        if let Some(total) = changes.total_price {
            model.total_price = Set(total);
        }
        if let Some(is_gift) = changes.is_gift {
            model.is_gift = Set(is_gift);
        }
        // selected_items left unset keeps the stored snapshot
        if let Some(items) = &changes.selected_items {
            model.selected_items = Set(items.clone());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn mark_cancelled(
        &self,
        id: &BookingId,
        updated_by: &str,
    ) -> Result<bool, DomainError> {
        let result = bookings::Entity::update_many()
            .col_expr(
                bookings::Column::OrderStatus,
                Expr::value(OrderStatus::Cancelled.to_string()),
            )
            .col_expr(
                bookings::Column::UpdatedBy,
                Expr::value(updated_by.to_string()),
            )
            .col_expr(
                bookings::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(bookings::Column::Id.eq(id.0))
            .filter(bookings::Column::OrderStatus.ne(OrderStatus::Cancelled.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_by_status(&self) -> Result<Vec<(OrderStatus, u64)>, DomainError> {
        let statuses = [
            OrderStatus::Booked,
            OrderStatus::InProgress,
            OrderStatus::Dispatched,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];

        let mut counts = Vec::with_capacity(statuses.len());
        for status in statuses {
            let count = bookings::Entity::find()
                .filter(bookings::Column::OrderStatus.eq(status.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            counts.push((status, count));
        }

        Ok(counts)
    }
}
