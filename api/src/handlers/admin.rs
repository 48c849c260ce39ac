//! Staff administration handlers
//!
//! Booking management, the reporting dashboard and email template editing.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::DashboardReport;
use crate::domain::entities::{Booking, BookingId, EmailTemplate, PaymentStatus, StaffUser};
use crate::domain::ports::{EmailTemplateRepository, UpdateBooking};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub report: DashboardReport,
    pub cancellation_requests: u64,
}

/// GET /admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let report = state.booking_service.dashboard_report().await?;
    let cancellation_requests = state.cancellation_service.request_count().await?;

    Ok(envelope(
        "Dashboard loaded.",
        DashboardResponse {
            report,
            cancellation_requests,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct AllocateDispatchRequest {
    pub order_date: DateTime<Utc>,
    /// Time-of-day slot, e.g. "14:30:00"
    pub dispatch_time: NaiveTime,
}

/// POST /admin/bookings/:id/allocate
pub async fn allocate_dispatch(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AllocateDispatchRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .booking_service
        .allocate_dispatch(
            &BookingId(id),
            request.order_date,
            request.dispatch_time,
            &user.username,
        )
        .await?;
    Ok(envelope("Dispatch allocated.", booking))
}

/// PATCH /admin/bookings/:id
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBooking>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .booking_service
        .update_booking(&BookingId(id), request, &user.username)
        .await?;
    Ok(envelope("Booking updated.", booking))
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: PaymentStatus,
}

/// POST /admin/bookings/:id/payment-status
pub async fn set_payment_status(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentStatusRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = state
        .booking_service
        .set_payment_status(&BookingId(id), request.status, &user.username)
        .await?;
    Ok(envelope("Payment status updated.", booking))
}

/// GET /admin/email-templates
pub async fn list_email_templates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmailTemplate>>>, AppError> {
    let templates = state.templates.list().await?;
    Ok(envelope("Templates loaded.", templates))
}

#[derive(Debug, Deserialize)]
pub struct UpsertTemplateRequest {
    pub template_key: String,
    pub subject: String,
    pub body: String,
}

/// PUT /admin/email-templates
pub async fn upsert_email_template(
    State(state): State<AppState>,
    Extension(user): Extension<StaffUser>,
    Json(request): Json<UpsertTemplateRequest>,
) -> Result<Json<ApiResponse<EmailTemplate>>, AppError> {
    let template = state
        .templates
        .upsert(
            &request.template_key,
            &request.subject,
            &request.body,
            &user.username,
        )
        .await?;
    Ok(envelope("Template saved.", template))
}
