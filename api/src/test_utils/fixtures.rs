//! Test fixtures

use crate::app::notification_service::template_keys;
use crate::domain::entities::{NewBooking, NewClient};

use super::mocks::InMemoryEmailTemplateRepository;

pub fn new_client() -> NewClient {
    NewClient {
        name: "Amna".to_string(),
        email: "amna@example.com".to_string(),
        phone: "+923001234567".to_string(),
        address: "12 Mall Rd".to_string(),
        city: "Lahore".to_string(),
        postal_code: "54000".to_string(),
    }
}

pub fn new_booking() -> NewBooking {
    NewBooking {
        order_date: None,
        dispatch_date: None,
        shipping_method: None,
        selected_items: None,
        total_price: 5000,
        is_gift: false,
    }
}

/// Template repository seeded with every template key the services dispatch
pub fn seeded_templates() -> InMemoryEmailTemplateRepository {
    InMemoryEmailTemplateRepository::new()
        .with_template(
            template_keys::BOOKING_CONFIRMATION,
            "Your booking is confirmed",
            "Dear {{ client_name }}, order {{ shipment_id }} is confirmed.",
        )
        .with_template(
            template_keys::ORDER_SHIPMENT,
            "We received your order",
            "Dear {{ client_name }}, order {{ shipment_id }} for {{ items }} \
             (total {{ total_price }}) has been received.",
        )
        .with_template(
            template_keys::SHIPMENT_ADMIN,
            "New order placed",
            "Order {{ shipment_id }} by {{ client_name }} ({{ contact_number }}): \
             {{ items }}, total {{ total_price }}.",
        )
        .with_template(
            template_keys::SHIPMENT_OTP,
            "Your cancellation code",
            "Dear {{ client_name }}, your OTP for order {{ shipment_id }} is {{ otp }}.",
        )
        .with_template(
            template_keys::SHIPMENT_CANCELLATION,
            "Your booking was cancelled",
            "Dear {{ client_name }}, order {{ shipment_id }} has been cancelled.",
        )
        .with_template(
            template_keys::BOOKING_TIME_ALLOCATION,
            "Your booking slot",
            "Dear {{ client_name }}, order {{ shipment_id }} is scheduled for \
             {{ order_date }} at {{ dispatch_time }}.",
        )
        .with_template(
            template_keys::NEWSLETTER_MAIL,
            "Welcome to our newsletter",
            "{{ email }} is now subscribed.",
        )
        .with_template(
            template_keys::CONTACT_US_CLIENT,
            "We received your message",
            "Dear {{ name }}, thanks for reaching out. We will reply shortly.",
        )
        .with_template(
            template_keys::CONTACT_US_ADMIN,
            "New contact message",
            "{{ name }} wrote: {{ message }}",
        )
        .with_template(
            template_keys::REPLY_USER,
            "A reply to your message",
            "Dear {{ name }}, {{ reply }}",
        )
        .with_template(
            template_keys::PASSWORD_RESET,
            "Password reset",
            "Hello {{ username }}. Code: {{ reset_code }}",
        )
}
