//! Published site content: blog posts, site policies and promotional deals.
//!
//! Blog posts are approval-gated like testimonials; policies and deals carry
//! an active flag that scopes what the public endpoints return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    /// Staff username of the post's author
    pub author: String,
    pub tags: Vec<String>,
    pub is_approved: bool,
    /// Flag for inclusion in newsletter mailings
    pub is_newsletter: bool,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_newsletter: bool,
}

impl NewBlogPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required.".to_string(),
            ));
        }
        if self.title.len() > 200 {
            return Err(DomainError::Validation(
                "Title must be at most 200 characters.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Policy {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPolicy {
    pub title: String,
    pub content: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewPolicy {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required.".to_string(),
            ));
        }
        if self.title.len() > 100 {
            return Err(DomainError::Validation(
                "Title must be at most 100 characters.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePolicy {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

/// Promotional bundle offered at a discounted price. The item names are a
/// denormalized snapshot; bookings reference deals by copying them into
/// `selected_items`.
#[derive(Debug, Clone, Serialize)]
pub struct Deal {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    pub included_items: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDeal {
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    #[serde(default)]
    pub included_items: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl NewDeal {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Deal name is required.".to_string()));
        }
        if self.price < 0 || self.discounted_price < 0 {
            return Err(DomainError::Validation(
                "Prices must not be negative.".to_string(),
            ));
        }
        Ok(())
    }
}
