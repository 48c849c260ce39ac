//! Community-facing records: testimonials, contact-us messages and replies,
//! newsletter subscriptions and job applications. All thin CRUD with
//! notification side effects handled by the services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

use super::client::validate_phone;

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub message: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimonial {
    pub name: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub message: String,
}

impl NewTestimonial {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(DomainError::Validation(
                "Name and message are required.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(DomainError::Validation(
                "Name and message are required.".to_string(),
            ));
        }
        if let Some(phone) = &self.phone_number {
            if !phone.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::Validation(
                    "Enter a valid phone number.".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsletterSubscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub cover_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJobApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub cover_note: Option<String>,
}

impl NewJobApplication {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.position.trim().is_empty() {
            return Err(DomainError::Validation(
                "Name and position are required.".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation(
                "A valid email address is required.".to_string(),
            ));
        }
        validate_phone(&self.phone)
    }
}
