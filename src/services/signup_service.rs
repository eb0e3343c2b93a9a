//! Domain service orchestrating a survey submission: duplicate pre-check,
//! account claim, submission persistence, credential delivery.

use serde::Serialize;
use thiserror::Error;

use crate::models::account::Account;
use crate::models::submission::NewSubmission;
use crate::services::allocator_service::AllocatorError;

/// Errors and terminal outcomes of a signup attempt.
#[derive(Debug, Error)]
pub enum SignupError {
    /// The email already holds an account. Terminal for this submission.
    #[error("This email has already been assigned a beta account")]
    DuplicateEmail,

    /// No account left to hand out. Terminal for this submission.
    #[error("All beta accounts have been assigned")]
    PoolExhausted,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AllocatorError> for SignupError {
    fn from(err: AllocatorError) -> Self {
        match err {
            AllocatorError::StoreUnavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}

impl From<anyhow::Error> for SignupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result of an accepted submission.
///
/// `email_sent == false` means the assignment is durable but the
/// notification failed; the caller must hand the credentials to the
/// applicant through another channel (the HTTP layer echoes them back).
#[derive(Debug, Clone, Serialize)]
pub struct SignupReceipt {
    pub account: Account,
    pub remaining: u64,
    pub email_sent: bool,
}

/// Domain service trait for the signup flow.
#[async_trait::async_trait]
pub trait SignupService: Send + Sync {
    /// Runs the full flow for one validated submission.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::DuplicateEmail`] when the email already holds
    /// an account and [`SignupError::PoolExhausted`] when no account is
    /// free; both are expected outcomes, not faults.
    async fn submit(&self, submission: NewSubmission) -> Result<SignupReceipt, SignupError>;

    /// Public "spots remaining" counter.
    async fn remaining(&self) -> Result<u64, SignupError>;
}
