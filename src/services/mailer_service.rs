//! Domain service for credential delivery.
//!
//! Delivery failures never roll back an assignment; the signup flow treats
//! the binding as durable and reports the failed notification instead.

use thiserror::Error;

use crate::models::account::Account;

/// Errors specific to mail delivery.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail configuration error: {0}")]
    Config(String),

    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}

/// Domain service trait for sending the credentials email.
#[async_trait::async_trait]
pub trait MailerService: Send + Sync {
    /// Delivers the assigned credentials to the applicant, plus an
    /// administrator copy when one is configured (its failure is logged,
    /// never surfaced).
    async fn send_credentials(
        &self,
        recipient_email: &str,
        recipient_name: &str,
        account: &Account,
    ) -> Result<(), MailerError>;
}
