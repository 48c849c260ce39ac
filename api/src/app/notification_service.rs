//! Notification dispatcher
//!
//! Renders a stored template in two stages (placeholder interpolation, then
//! embedding into the shared wrapper layout) and hands the result to the
//! mail transport. Dispatch is best-effort: failures are logged and reported
//! through [`SendOutcome`], never propagated to the triggering operation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::EmailTemplate;
use crate::domain::ports::{EmailTemplateRepository, Mailer};

/// Template keys, matching the admin-editable rows
pub mod template_keys {
    pub const BOOKING_CONFIRMATION: &str = "Booking_Confirmation";
    pub const ORDER_SHIPMENT: &str = "Order_Shipment";
    pub const SHIPMENT_ADMIN: &str = "Shipment_Admin";
    pub const SHIPMENT_OTP: &str = "Shipment_OTP";
    pub const SHIPMENT_CANCELLATION: &str = "Shipment_Cancellation";
    pub const BOOKING_TIME_ALLOCATION: &str = "Booking_Time_Allocation";
    pub const NEWSLETTER_MAIL: &str = "Newsletter_Mail";
    pub const CONTACT_US_CLIENT: &str = "Contact_Us_Client";
    pub const CONTACT_US_ADMIN: &str = "Contact_Us_Admin";
    pub const REPLY_USER: &str = "Reply_User";
    pub const PASSWORD_RESET: &str = "Password_Reset";
}

/// What happened to a dispatch attempt. Observable by callers and tests,
/// but no variant is an error from the triggering operation's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    TemplateMissing,
    TransportFailed,
}

pub struct NotificationService<TR, M>
where
    TR: EmailTemplateRepository,
    M: Mailer,
{
    templates: Arc<TR>,
    mailer: Arc<M>,
    admin_email: String,
}

impl<TR, M> NotificationService<TR, M>
where
    TR: EmailTemplateRepository,
    M: Mailer,
{
    pub fn new(templates: Arc<TR>, mailer: Arc<M>, admin_email: String) -> Self {
        Self {
            templates,
            mailer,
            admin_email,
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Render the stored template for `key` and send it to `recipients`.
    pub async fn dispatch(
        &self,
        key: &str,
        context: &BTreeMap<String, String>,
        recipients: &[String],
    ) -> SendOutcome {
        let template = match self.templates.find_by_key(key).await {
            Ok(Some(t)) => t,
            Ok(None) => {
                tracing::warn!(template = %key, "Email template not found, skipping send");
                return SendOutcome::TemplateMissing;
            }
            Err(e) => {
                tracing::error!(template = %key, error = %e, "Template lookup failed");
                return SendOutcome::TemplateMissing;
            }
        };

        let html = render_email(&template, context);

        match self.mailer.send(&template.subject, &html, recipients).await {
            Ok(()) => {
                tracing::info!(template = %key, recipients = ?recipients, "Email sent");
                SendOutcome::Sent
            }
            Err(e) => {
                tracing::error!(template = %key, error = %e, "Email send failed");
                SendOutcome::TransportFailed
            }
        }
    }
}

/// Two-stage render: interpolate the context into the stored body, then
/// embed the result into the shared wrapper layout.
fn render_email(template: &EmailTemplate, context: &BTreeMap<String, String>) -> String {
    let body = template.render(context);
    wrap_layout(&template.subject, &body)
}

fn wrap_layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body style=\"font-family: Arial, sans-serif; margin: 0; padding: 0;\">\n\
         <div style=\"max-width: 600px; margin: 0 auto; padding: 24px;\">\n{body}\n</div>\n\
         </body>\n</html>"
    )
}
