//! Staff user entity
//!
//! Backs register/login/logout/password-reset. Credentials are stored as
//! SHA-256 hashes; the plaintext API key is only shown once at login.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StaffId(pub Uuid);

impl StaffId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for StaffId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffUser {
    pub id: StaffId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Hash of the currently issued API key; None when logged out
    #[serde(skip_serializing)]
    pub api_key_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
