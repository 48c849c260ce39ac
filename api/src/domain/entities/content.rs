//! Site content row
//!
//! One denormalized row per page component; the navbar lives under
//! (page "home_page", component "nav_links", name "menu") and mirrors the
//! JSON document kept in object storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const NAVBAR_PAGE: &str = "home_page";
pub const NAVBAR_COMPONENT: &str = "nav_links";
pub const NAVBAR_NAME: &str = "menu";

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub id: Uuid,
    pub page: String,
    pub component: String,
    pub name: String,
    pub hierarchical_json: Option<Value>,
    pub updated_at: DateTime<Utc>,
}
