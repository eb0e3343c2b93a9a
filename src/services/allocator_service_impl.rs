//! `SeaORM` implementation of the `AccountAllocator` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::account::Account;
use crate::services::allocator_service::{AccountAllocator, AllocatorError, AssignOutcome};

pub struct SeaOrmAccountAllocator {
    store: Store,
}

impl SeaOrmAccountAllocator {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountAllocator for SeaOrmAccountAllocator {
    async fn next_available(&self) -> Result<Option<Account>, AllocatorError> {
        let account = self.store.next_available().await?;
        Ok(account)
    }

    async fn assign(&self, account_id: i32, email: &str) -> Result<AssignOutcome, AllocatorError> {
        let outcome = self.store.assign_account(account_id, email).await?;
        Ok(outcome)
    }

    async fn is_email_assigned(&self, email: &str) -> Result<Option<Account>, AllocatorError> {
        let account = self.store.find_account_by_email(email).await?;
        Ok(account)
    }

    async fn available_count(&self) -> Result<u64, AllocatorError> {
        let count = self.store.available_account_count().await?;
        Ok(count)
    }

    async fn list_all(&self) -> Result<Vec<Account>, AllocatorError> {
        let accounts = self.store.list_accounts().await?;
        Ok(accounts)
    }

    async fn reset_all(&self) -> Result<u64, AllocatorError> {
        let cleared = self.store.reset_accounts().await?;
        Ok(cleared)
    }
}
