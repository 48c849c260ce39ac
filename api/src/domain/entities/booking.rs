//! Booking domain entity
//!
//! A booking snapshots the customer's selected catalog items as a JSON
//! document and carries an order id generated once at creation.

use chrono::{DateTime, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::client::ClientId;
use crate::domain::entities::payment::PaymentStatus;

/// Unique identifier for a booking (database key; the customer-facing key
/// is the generated `order_id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BookingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a customer-facing order id: "EShp#" followed by 10 random digits.
/// Generated exactly once at creation and never regenerated on update.
pub fn generate_order_id() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..10).map(|_| rng.gen_range(0..10).to_string()).collect();
    format!("EShp#{}", digits)
}

/// Order lifecycle status
///
/// Transitions are deliberately unconstrained (COMPLETED back to BOOKED is
/// accepted); the enum only bounds the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Booked,
    InProgress,
    Dispatched,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Booked => "BOOKED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKED" => Ok(OrderStatus::Booked),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "DISPATCHED" => Ok(OrderStatus::Dispatched),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub client_id: ClientId,
    pub order_id: String,
    pub order_date: Option<DateTime<Utc>>,
    pub dispatch_date: Option<NaiveTime>,
    pub shipping_method: String,
    /// Free-form snapshot of the selected catalog items; `{}` when unset
    pub selected_items: Value,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_price: i64,
    pub is_gift: bool,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Price used for payment amounts and notification content: the deal
    /// total when the snapshot contains deals, the caller-supplied total
    /// otherwise.
    pub fn effective_total(&self) -> i64 {
        let summary = selected_items_summary(&self.selected_items);
        if summary.has_deals {
            summary.deal_total
        } else {
            self.total_price
        }
    }
}

/// Data needed to create a new booking
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub order_date: Option<DateTime<Utc>>,
    pub dispatch_date: Option<NaiveTime>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    pub selected_items: Option<Value>,
    pub total_price: i64,
    #[serde(default)]
    pub is_gift: bool,
}

/// Aggregate view over a `selected_items` document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsSummary {
    pub names: Vec<String>,
    pub total_persons: i64,
    pub deal_total: i64,
    pub has_deals: bool,
}

impl ItemsSummary {
    pub fn joined_names(&self) -> String {
        self.names.join(", ")
    }
}

/// Walk a `selected_items` document and collect item names, person counts
/// and the summed deal price.
///
/// Services nest through `categories`, `sub_services` and
/// `subservice_category`; deals are a flat list with `numPersons` and
/// `discounted_price`.
pub fn selected_items_summary(selected_items: &Value) -> ItemsSummary {
    let mut summary = ItemsSummary::default();

    if let Some(services) = selected_items.get("services").and_then(Value::as_array) {
        collect_service_items(services, &mut summary);
    }

    if let Some(deals) = selected_items.get("deals").and_then(Value::as_array) {
        if !deals.is_empty() {
            summary.has_deals = true;
        }
        for deal in deals {
            let name = deal
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unnamed");
            summary.names.push(name.to_string());
            summary.total_persons += deal.get("numPersons").and_then(Value::as_i64).unwrap_or(0);
            summary.deal_total += deal
                .get("discounted_price")
                .and_then(Value::as_i64)
                .unwrap_or(0);
        }
    }

    summary
}

fn collect_service_items(items: &[Value], summary: &mut ItemsSummary) {
    for item in items {
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unnamed");
        summary.names.push(name.to_string());
        summary.total_persons += item
            .get("no_of_persons")
            .and_then(Value::as_i64)
            .unwrap_or(0);

        for nested in ["categories", "sub_services", "subservice_category"] {
            if let Some(children) = item.get(nested).and_then(Value::as_array) {
                collect_service_items(children, summary);
            }
        }
    }
}
