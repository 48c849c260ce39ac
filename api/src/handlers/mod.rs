//! HTTP handlers
//!
//! Axum request handlers. Every endpoint responds with the
//! `{success, message, data}` envelope.

use axum::Json;
use serde::Serialize;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod cancellations;
pub mod catalog;
pub mod community;
pub mod publishing;

pub use admin::{
    allocate_dispatch, dashboard, list_email_templates, set_payment_status, update_booking,
    upsert_email_template,
};
pub use auth::{login, logout, register, request_password_reset, reset_password};
pub use bookings::{create_booking, get_booking};
pub use cancellations::{admin_cancel_booking, confirm_cancellation, request_cancellation_otp};
pub use catalog::{
    browse_catalog, create_category, create_collection, create_product, get_navbar,
    list_categories, rebuild_navbar, search_products, update_category, update_collection,
    update_product,
};
pub use community::{
    apply_for_job, approve_testimonial, list_testimonials, reply_to_contact, submit_contact,
    submit_testimonial, subscribe_newsletter,
};
pub use publishing::{
    approve_blog_post, create_blog_post, create_deal, create_policy, delete_deal, get_blog_post,
    list_all_deals, list_blog_posts, list_deals, list_policies, update_policy,
};

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

pub fn envelope<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let response = envelope("Saved.", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Saved.");
        assert_eq!(json["data"]["id"], 1);
    }
}
