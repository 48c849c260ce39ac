//! Booking handlers
//!
//! Public endpoints for placing and tracking orders.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Booking, Client, NewBooking, NewClient, Payment};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub client: NewClient,
    pub booking: NewBooking,
    /// Card transaction id; absent for cash on delivery
    pub transaction_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub order_id: String,
    pub client: Client,
    pub booking: Booking,
    pub payment: Payment,
}

/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let (client, booking, payment) = state
        .booking_service
        .construct_booking(request.client, request.booking, request.transaction_id, "system")
        .await?;

    Ok(envelope(
        "Booking created.",
        BookingResponse {
            order_id: booking.order_id.clone(),
            client,
            booking,
            payment,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub contact_number: String,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub client: Client,
    pub booking: Booking,
}

/// GET /bookings/:order_id?contact_number=...
pub async fn get_booking(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<ApiResponse<TrackingResponse>>, AppError> {
    let (client, booking) = state
        .booking_service
        .get_booking(&order_id, &query.contact_number)
        .await?;

    Ok(envelope(
        "Booking found.",
        TrackingResponse { client, booking },
    ))
}
