//! Mail transport adapters
//!
//! `HttpMailer` talks to an HTTP transactional-mail gateway; `NoopMailer`
//! is wired in when EMAIL_ENABLED is off and only logs what it skipped.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::Mailer;
use crate::error::MailError;

pub struct HttpMailer {
    client: reqwest::Client,
    base_url: String,
    token: String,
    sender: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(base_url: String, token: String, sender: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
            sender,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&SendRequest {
                from: &self.sender,
                to: recipients,
                subject,
                html: html_body,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Gateway { status, message });
        }

        Ok(())
    }
}

/// Runtime-selected transport: the HTTP gateway when email is enabled,
/// the no-op otherwise.
pub enum MailTransport {
    Http(HttpMailer),
    Noop(NoopMailer),
}

#[async_trait]
impl Mailer for MailTransport {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        match self {
            MailTransport::Http(mailer) => mailer.send(subject, html_body, recipients).await,
            MailTransport::Noop(mailer) => mailer.send(subject, html_body, recipients).await,
        }
    }
}

/// Mailer used when email sending is disabled by configuration
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(
        &self,
        subject: &str,
        _html_body: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        tracing::info!(
            subject = %subject,
            recipients = ?recipients,
            "Email not enabled, skipping send"
        );
        Ok(())
    }
}
