//! Cancellation domain entity
//!
//! A CancelBooking row is created when a customer requests an OTP (or when
//! staff cancel directly, as an audit record). The OTP never expires.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use super::booking::BookingId;
use super::client::ClientId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CancelBookingId(pub Uuid);

impl CancelBookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CancelBookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CancelBookingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Generate a 6-digit numeric OTP
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..10).to_string()).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelBooking {
    pub id: CancelBookingId,
    pub booking_id: BookingId,
    pub client_id: ClientId,
    pub contact_no: String,
    #[serde(skip_serializing)]
    pub otp: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to open a cancellation request
#[derive(Debug, Clone)]
pub struct NewCancelBooking {
    pub booking_id: BookingId,
    pub client_id: ClientId,
    pub contact_no: String,
    pub otp: String,
    pub created_by: String,
}
