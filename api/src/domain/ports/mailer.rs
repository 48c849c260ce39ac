//! Mail transport port
//!
//! The dispatcher renders templates; this port only moves bytes. Production
//! wiring is an HTTP transactional-mail gateway, tests use a recording mock.

use async_trait::async_trait;

use crate::error::MailError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), MailError>;
}
