//! PostgreSQL adapter for CancelBookingRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    BookingId, CancelBooking, CancelBookingId, ClientId, NewCancelBooking,
};
use crate::domain::ports::CancelBookingRepository;
use crate::entity::cancel_bookings;
use crate::error::DomainError;

pub struct PostgresCancelBookingRepository {
    db: DatabaseConnection,
}

impl PostgresCancelBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<cancel_bookings::Model> for CancelBooking {
    fn from(m: cancel_bookings::Model) -> Self {
        CancelBooking {
            id: CancelBookingId(m.id),
            booking_id: BookingId(m.booking_id),
            client_id: ClientId(m.client_id),
            contact_no: m.contact_no,
            otp: m.otp,
            created_by: m.created_by,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl CancelBookingRepository for PostgresCancelBookingRepository {
    async fn create(&self, request: &NewCancelBooking) -> Result<CancelBooking, DomainError> {
        let result = cancel_bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(request.booking_id.0),
            client_id: Set(request.client_id.0),
            contact_no: Set(request.contact_no.clone()),
            otp: Set(request.otp.clone()),
            created_by: Set(request.created_by.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_booking_and_otp(
        &self,
        booking_id: &BookingId,
        otp: &str,
    ) -> Result<Option<CancelBooking>, DomainError> {
        let result = cancel_bookings::Entity::find()
            .filter(cancel_bookings::Column::BookingId.eq(booking_id.0))
            .filter(cancel_bookings::Column::Otp.eq(otp))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        cancel_bookings::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
