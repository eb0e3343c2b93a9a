//! Default implementation of the `SignupService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::api::NotificationEvent;
use crate::db::Store;
use crate::models::account::Account;
use crate::models::submission::NewSubmission;
use crate::services::allocator_service::{AccountAllocator, AssignOutcome};
use crate::services::mailer_service::MailerService;
use crate::services::signup_service::{SignupError, SignupReceipt, SignupService};

pub struct DefaultSignupService {
    store: Store,
    allocator: Arc<dyn AccountAllocator>,
    mailer: Arc<dyn MailerService>,
    event_bus: broadcast::Sender<NotificationEvent>,
    low_watermark: u64,
}

impl DefaultSignupService {
    pub fn new(
        store: Store,
        allocator: Arc<dyn AccountAllocator>,
        mailer: Arc<dyn MailerService>,
        event_bus: broadcast::Sender<NotificationEvent>,
        low_watermark: u64,
    ) -> Self {
        Self {
            store,
            allocator,
            mailer,
            event_bus,
            low_watermark,
        }
    }

    /// Claims one account for `email`: pick the next available row, attempt
    /// the conditional assignment, retry on a lost race. Bounded by pool
    /// size, since every lost race means some other caller permanently
    /// consumed an account.
    async fn claim_account(&self, email: &str) -> Result<Account, SignupError> {
        let attempts = self
            .store
            .total_account_count()
            .await
            .map_err(|e| SignupError::StoreUnavailable(e.to_string()))?;

        for _ in 0..attempts.max(1) {
            let Some(candidate) = self.allocator.next_available().await? else {
                return Err(SignupError::PoolExhausted);
            };

            match self.allocator.assign(candidate.id, email).await? {
                AssignOutcome::Assigned(account) => return Ok(account),
                AssignOutcome::AlreadyAssigned => {
                    // Lost the race for this row; pick the next one.
                    continue;
                }
                AssignOutcome::EmailTaken => return Err(SignupError::DuplicateEmail),
            }
        }

        Err(SignupError::PoolExhausted)
    }
}

#[async_trait]
impl SignupService for DefaultSignupService {
    async fn submit(&self, submission: NewSubmission) -> Result<SignupReceipt, SignupError> {
        // Friendly fast path. Two submissions from the same email can both
        // pass this check; the unique index consulted inside `assign` is
        // what actually closes the window.
        if self
            .allocator
            .is_email_assigned(&submission.email)
            .await?
            .is_some()
        {
            return Err(SignupError::DuplicateEmail);
        }

        let account = self.claim_account(&submission.email).await?;

        // The assignment is already durable. A failure to persist the
        // survey row or to deliver the email must not undo it.
        if let Err(e) = self
            .store
            .record_submission(&submission, Some(account.id))
            .await
        {
            warn!(
                "Failed to record survey submission for {}: {}",
                submission.email, e
            );
        }

        let email_sent = match self
            .mailer
            .send_credentials(&submission.email, &submission.name, &account)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Credentials email to {} failed, assignment kept: {}",
                    submission.email, e
                );
                let _ = self.event_bus.send(NotificationEvent::EmailDeliveryFailed {
                    recipient: submission.email.clone(),
                });
                false
            }
        };

        let remaining = self.allocator.available_count().await?;

        info!(
            "Signup accepted: {} -> {} ({} spot(s) remaining)",
            submission.email, account.username, remaining
        );

        let _ = self.event_bus.send(NotificationEvent::AccountAssigned {
            username: account.username.clone(),
            remaining,
        });

        if remaining <= self.low_watermark {
            warn!("Account pool is low: {} spot(s) remaining", remaining);
            let _ = self
                .event_bus
                .send(NotificationEvent::PoolLow { remaining });
        }

        Ok(SignupReceipt {
            account,
            remaining,
            email_sent,
        })
    }

    async fn remaining(&self) -> Result<u64, SignupError> {
        let remaining = self.allocator.available_count().await?;
        Ok(remaining)
    }
}
