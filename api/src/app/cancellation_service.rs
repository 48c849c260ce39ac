//! Cancellation service
//!
//! OTP-gated customer cancellation plus direct staff cancellation. The
//! cancel flip is a conditional write: a booking already cancelled reports
//! a conflict instead of re-sending the cancellation email.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app::notification_service::{template_keys, NotificationService};
use crate::domain::entities::{
    generate_otp, normalize_contact_number, Booking, BookingId, CancelBooking, Client,
    NewCancelBooking,
};
use crate::domain::ports::{
    BookingRepository, CancelBookingRepository, ClientRepository, EmailTemplateRepository, Mailer,
};
use crate::error::AppError;

pub struct CancellationService<CR, BR, CBR, TR, M>
where
    CR: ClientRepository,
    BR: BookingRepository,
    CBR: CancelBookingRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    clients: Arc<CR>,
    bookings: Arc<BR>,
    cancellations: Arc<CBR>,
    notifications: Arc<NotificationService<TR, M>>,
}

impl<CR, BR, CBR, TR, M> CancellationService<CR, BR, CBR, TR, M>
where
    CR: ClientRepository,
    BR: BookingRepository,
    CBR: CancelBookingRepository,
    TR: EmailTemplateRepository,
    M: Mailer,
{
    pub fn new(
        clients: Arc<CR>,
        bookings: Arc<BR>,
        cancellations: Arc<CBR>,
        notifications: Arc<NotificationService<TR, M>>,
    ) -> Self {
        Self {
            clients,
            bookings,
            cancellations,
            notifications,
        }
    }

    /// Open a cancellation request: verify the order id and contact number,
    /// record the OTP and email it to the client.
    pub async fn request_otp(
        &self,
        order_id: &str,
        contact_number: &str,
    ) -> Result<CancelBooking, AppError> {
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

        let otp = generate_otp();
        let record = self
            .cancellations
            .create(&NewCancelBooking {
                booking_id: booking.id,
                client_id: booking.client_id,
                contact_no: phone,
                otp: otp.clone(),
                created_by: "system".to_string(),
            })
            .await?;

        if let Some(client) = self.clients.find_by_id(&booking.client_id).await? {
            let mut context = cancellation_context(&client, &booking);
            context.insert("otp".to_string(), otp);
            self.notifications
                .dispatch(template_keys::SHIPMENT_OTP, &context, &[client.email])
                .await;
        }

        Ok(record)
    }

    /// Confirm a cancellation with the OTP emailed earlier. OTPs do not
    /// expire; a second confirm attempt reports the booking as already
    /// cancelled.
    pub async fn confirm(&self, order_id: &str, otp: &str) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

        self.cancellations
            .find_by_booking_and_otp(&booking.id, otp)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid OTP.".to_string()))?;

        self.cancel(&booking, "system").await
    }

    /// Staff cancellation without an OTP; still leaves an audit record.
    pub async fn admin_cancel(
        &self,
        booking_id: &BookingId,
        cancelled_by: &str,
    ) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

        if let Some(client) = self.clients.find_by_id(&booking.client_id).await? {
            self.cancellations
                .create(&NewCancelBooking {
                    booking_id: booking.id,
                    client_id: booking.client_id,
                    contact_no: client.phone,
                    otp: generate_otp(),
                    created_by: cancelled_by.to_string(),
                })
                .await?;
        }

        self.cancel(&booking, cancelled_by).await
    }

    pub async fn request_count(&self) -> Result<u64, AppError> {
        Ok(self.cancellations.count().await?)
    }

    async fn cancel(&self, booking: &Booking, cancelled_by: &str) -> Result<Booking, AppError> {
        let changed = self.bookings.mark_cancelled(&booking.id, cancelled_by).await?;
        if !changed {
            return Err(AppError::Conflict(
                "Booking is already cancelled.".to_string(),
            ));
        }

        let cancelled = self
            .bookings
            .find_by_id(&booking.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

        if let Some(client) = self.clients.find_by_id(&booking.client_id).await? {
            let context = cancellation_context(&client, &cancelled);
            self.notifications
                .dispatch(
                    template_keys::SHIPMENT_CANCELLATION,
                    &context,
                    &[client.email],
                )
                .await;
        }

        Ok(cancelled)
    }
}

fn cancellation_context(client: &Client, booking: &Booking) -> BTreeMap<String, String> {
    let mut context = BTreeMap::new();
    context.insert("client_name".to_string(), client.name.clone());
    context.insert("shipment_id".to_string(), booking.order_id.clone());
    context
}
