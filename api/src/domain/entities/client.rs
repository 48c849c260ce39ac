//! Client domain entity
//!
//! A customer who places bookings. Clients are created through the public
//! API or by staff; either way the record is stamped with the acting user
//! ("system" for frontend calls).

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+(?:[0-9] ?){6,14}[0-9]$").unwrap())
}

/// Validate a phone number: country code required, e.g. "+923001234567"
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    if phone_regex().is_match(phone) {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "Phone number must be entered in the format: '+999999999'. Country code required."
                .to_string(),
        ))
    }
}

/// Strip whitespace and ensure the leading '+' survives URL decoding.
pub fn normalize_contact_number(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.starts_with('+') {
        cleaned
    } else {
        format!("+{}", cleaned)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a new client
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required.".to_string()));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation(
                "A valid email address is required.".to_string(),
            ));
        }
        validate_phone(&self.phone)
    }
}
