//! Community handlers
//!
//! Testimonials, contact-us, newsletter and hiring endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{
    ContactMessage, JobApplication, NewContactMessage, NewJobApplication, NewTestimonial, Reply,
    Testimonial,
};
use crate::error::AppError;
use crate::handlers::{envelope, ApiResponse};
use crate::AppState;

/// POST /testimonials
pub async fn submit_testimonial(
    State(state): State<AppState>,
    Json(request): Json<NewTestimonial>,
) -> Result<Json<ApiResponse<Testimonial>>, AppError> {
    let testimonial = state.community_service.submit_testimonial(request).await?;
    Ok(envelope(
        "Thank you! Your testimonial is pending review.",
        testimonial,
    ))
}

/// GET /testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Testimonial>>>, AppError> {
    let testimonials = state.community_service.approved_testimonials().await?;
    Ok(envelope("Testimonials loaded.", testimonials))
}

/// POST /admin/testimonials/:id/approve
pub async fn approve_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Testimonial>>, AppError> {
    let testimonial = state.community_service.approve_testimonial(&id).await?;
    Ok(envelope("Testimonial approved.", testimonial))
}

/// POST /contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<NewContactMessage>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    let message = state.community_service.submit_contact(request).await?;
    Ok(envelope("Thanks for reaching out. We will reply shortly.", message))
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

/// POST /admin/contact/:id/reply
pub async fn reply_to_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ApiResponse<Reply>>, AppError> {
    let reply = state
        .community_service
        .reply_to_contact(&id, &request.message)
        .await?;
    Ok(envelope("Reply sent.", reply))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// POST /newsletter/subscribe
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let subscriber = state
        .community_service
        .subscribe_newsletter(&request.email)
        .await?;
    Ok(envelope(
        "Subscribed.",
        serde_json::json!({"email": subscriber.email}),
    ))
}

/// POST /careers/apply
pub async fn apply_for_job(
    State(state): State<AppState>,
    Json(request): Json<NewJobApplication>,
) -> Result<Json<ApiResponse<JobApplication>>, AppError> {
    let application = state.community_service.submit_application(request).await?;
    Ok(envelope("Application received.", application))
}
