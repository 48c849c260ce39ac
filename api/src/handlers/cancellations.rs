//! Cancellation handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingId, StaffUser};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub order_id: String,
    pub contact_number: String,
}

/// POST /bookings/cancel/request-otp
///
/// The OTP is only delivered by email; the response never carries it.
pub async fn request_cancellation_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state
        .cancellation_service
        .request_otp(&request.order_id, &request.contact_number)
        .await?;

    Ok(envelope(
        "An OTP has been sent to your registered email.",
        serde_json::json!({"order_id": request.order_id}),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmCancellationRequest {
    pub order_id: String,
    pub otp: String,
}

/// POST /bookings/cancel/confirm
pub async fn confirm_cancellation(
    State(state): State<AppState>,
    Json(request): Json<ConfirmCancellationRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .cancellation_service
        .confirm(&request.order_id, &request.otp)
        .await?;

    Ok(envelope("Booking cancelled.", booking))
}

/// POST /admin/bookings/:id/cancel
pub async fn admin_cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .cancellation_service
        .admin_cancel(&BookingId(id), &user.username)
        .await?;

    Ok(envelope("Booking cancelled.", booking))
}
