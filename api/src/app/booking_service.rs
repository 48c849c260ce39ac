//! Booking service
//!
//! Orders/bookings with their client and payment records. Creation is one
//! transaction; payment-status changes are synchronized writes whose change
//! flag drives the exactly-once paid notification.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};

use crate::app::notification_service::{template_keys, NotificationService};
use crate::domain::entities::{
    generate_order_id, normalize_contact_number, selected_items_summary, Booking, BookingId,
    Client, NewBooking, NewClient, OrderStatus, Payment, PaymentStatus,
};
use crate::domain::ports::{
    BookingRepository, ClientRepository, EmailTemplateRepository, Mailer, PaymentRepository,
    UpdateBooking,
};
use crate::error::{AppError, DomainError};

/// Booking counts per status plus totals, for the reporting dashboard
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardReport {
    pub booked: u64,
    pub in_progress: u64,
    pub dispatched: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub paid_revenue: i64,
}

pub struct BookingService<CR, BR, PR, TR, M>
where
    CR: ClientRepository,
    BR: BookingRepository,
    PR: PaymentRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    clients: Arc<CR>,
    bookings: Arc<BR>,
    payments: Arc<PR>,
    notifications: Arc<NotificationService<TR, M>>,
}

impl<CR, BR, PR, TR, M> BookingService<CR, BR, PR, TR, M>
where
    CR: ClientRepository,
    BR: BookingRepository,
    PR: PaymentRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    pub fn new(
        clients: Arc<CR>,
        bookings: Arc<BR>,
        payments: Arc<PR>,
        notifications: Arc<NotificationService<TR, M>>,
    ) -> Self {
        Self {
            clients,
            bookings,
            payments,
            notifications,
        }
    }

    /// Create a client, booking and initial payment in one transaction, then
    /// send the order and admin notifications.
    pub async fn construct_booking(
        &self,
        client: NewClient,
        booking: NewBooking,
        transaction_id: Option<i64>,
        created_by: &str,
    ) -> Result<(Client, Booking, Payment), AppError> {
        client.validate()?;

        let order_id = generate_order_id();

        // Deal snapshots carry their own discounted total
        let summary = booking
            .selected_items
            .as_ref()
            .map(selected_items_summary)
            .unwrap_or_default();
        let amount = if summary.has_deals {
            summary.deal_total
        } else {
            booking.total_price
        };

        let (client, booking, payment) = self
            .bookings
            .create_with_client(&client, &booking, &order_id, amount, transaction_id, created_by)
            .await?;

        let context = booking_context(&client, &booking);
        self.notifications
            .dispatch(
                template_keys::ORDER_SHIPMENT,
                &context,
                &[client.email.clone()],
            )
            .await;
        self.notifications
            .dispatch(
                template_keys::SHIPMENT_ADMIN,
                &context,
                &[self.notifications.admin_email().to_string()],
            )
            .await;

        Ok((client, booking, payment))
    }

    /// Customer-facing lookup by order id and registered contact number
    pub async fn get_booking(
        &self,
        order_id: &str,
        contact_number: &str,
    ) -> Result<(Client, Booking), AppError> {
        let phone = normalize_contact_number(contact_number);

        if self.bookings.find_by_order_id(order_id).await?.is_none() {
            return Err(AppError::NotFound("Booking not found.".to_string()));
        }

        let booking = self
            .bookings
            .find_by_order_id_and_phone(order_id, &phone)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Contact number does not match our records.".to_string())
            })?;

        let client = self
            .clients
            .find_by_id(&booking.client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found.".to_string()))?;

        Ok((client, booking))
    }

    pub async fn find_by_id(&self, id: &BookingId) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))
            .map_err(Into::into)
    }

    /// Staff allocation of order/dispatch dates. The booking's payment is
    /// refreshed to PENDING with the effective total, never duplicated.
    pub async fn allocate_dispatch(
        &self,
        id: &BookingId,
        order_date: DateTime<Utc>,
        dispatch_date: NaiveTime,
        updated_by: &str,
    ) -> Result<Booking, AppError> {
        if self.bookings.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Booking not found.".to_string()));
        }

        let booking = self
            .bookings
            .set_dispatch(id, order_date, dispatch_date, updated_by)
            .await?;

        self.payments
            .upsert_pending(id, booking.effective_total(), updated_by)
            .await?;

        if let Some(client) = self.clients.find_by_id(&booking.client_id).await? {
            let mut context = booking_context(&client, &booking);
            context.insert(
                "order_date".to_string(),
                order_date.format("%Y-%m-%d").to_string(),
            );
            context.insert(
                "dispatch_time".to_string(),
                dispatch_date.format("%H:%M").to_string(),
            );
            self.notifications
                .dispatch(
                    template_keys::BOOKING_TIME_ALLOCATION,
                    &context,
                    &[client.email],
                )
                .await;
        }

        Ok(booking)
    }

    /// Set the payment status, mirroring it onto the booking. The PAID
    /// confirmation fires only when the write actually changed the status.
    pub async fn set_payment_status(
        &self,
        id: &BookingId,
        status: PaymentStatus,
        updated_by: &str,
    ) -> Result<Booking, AppError> {
        if self.bookings.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Booking not found.".to_string()));
        }

        let changed = self
            .payments
            .set_status_synced(id, status, updated_by)
            .await?;

        let booking = self.find_by_id(id).await?;

        if changed && status.is_paid() {
            if let Some(client) = self.clients.find_by_id(&booking.client_id).await? {
                let context = booking_context(&client, &booking);
                self.notifications
                    .dispatch(
                        template_keys::BOOKING_CONFIRMATION,
                        &context,
                        &[client.email],
                    )
                    .await;
            }
        }

        Ok(booking)
    }

    /// Staff partial update. `selected_items` keeps the stored snapshot when
    /// the caller does not resend it.
    pub async fn update_booking(
        &self,
        id: &BookingId,
        changes: UpdateBooking,
        updated_by: &str,
    ) -> Result<Booking, AppError> {
        if self.bookings.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Booking not found.".to_string()));
        }

        Ok(self.bookings.update(id, &changes, updated_by).await?)
    }

    pub async fn dashboard_report(&self) -> Result<DashboardReport, AppError> {
        let counts = self.bookings.count_by_status().await?;
        let paid_revenue = self.payments.paid_revenue().await?;

        let count_for = |status: OrderStatus| {
            counts
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, n)| *n)
                .unwrap_or(0)
        };

        Ok(DashboardReport {
            booked: count_for(OrderStatus::Booked),
            in_progress: count_for(OrderStatus::InProgress),
            dispatched: count_for(OrderStatus::Dispatched),
            completed: count_for(OrderStatus::Completed),
            cancelled: count_for(OrderStatus::Cancelled),
            paid_revenue,
        })
    }
}

/// Shared template context for booking notifications
fn booking_context(client: &Client, booking: &Booking) -> BTreeMap<String, String> {
    let summary = selected_items_summary(&booking.selected_items);
    let mut context = BTreeMap::new();
    context.insert("client_name".to_string(), client.name.clone());
    context.insert("client_email".to_string(), client.email.clone());
    context.insert("contact_number".to_string(), client.phone.clone());
    context.insert("shipment_id".to_string(), booking.order_id.clone());
    context.insert("items".to_string(), summary.joined_names());
    context.insert(
        "total_persons".to_string(),
        summary.total_persons.to_string(),
    );
    context.insert(
        "total_price".to_string(),
        booking.effective_total().to_string(),
    );
    context.insert(
        "shipping_method".to_string(),
        booking.shipping_method.clone(),
    );
    context
}
