//! Domain service for the beta account pool.
//!
//! Maintains the invariant "each account assigned to at most one email, each
//! email holds at most one account" under concurrent callers, and answers
//! availability queries.

use thiserror::Error;

use crate::models::account::Account;

pub use crate::db::AssignOutcome;

/// Errors specific to allocator operations.
///
/// Expected conditions (lost race, email taken, pool exhausted) are not
/// errors: they travel as [`AssignOutcome`] variants or `None` results.
/// Only store failures surface here, and they are not retried internally.
#[derive(Debug, Error)]
pub enum AllocatorError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<sea_orm::DbErr> for AllocatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

/// Domain service trait for account allocation.
#[async_trait::async_trait]
pub trait AccountAllocator: Send + Sync {
    /// Returns the first unassigned account, ordered by id ascending.
    ///
    /// The ordering is a documented contract so allocation order is
    /// reproducible. The result is advisory, not a reservation: a
    /// concurrent caller's `assign` may still win the row, in which case
    /// this caller's own `assign` reports the lost race.
    async fn next_available(&self) -> Result<Option<Account>, AllocatorError>;

    /// Atomically binds `account_id` to `email` if the account is still
    /// unassigned (compare-and-set at the store, never read-then-write).
    ///
    /// Callers must treat [`AssignOutcome::AlreadyAssigned`] as "retry from
    /// `next_available`", bounded by pool size, not as a fatal error.
    async fn assign(&self, account_id: i32, email: &str) -> Result<AssignOutcome, AllocatorError>;

    /// Best-effort pre-check for an existing assignment. The store-level
    /// unique index remains the authoritative guard; see `assign`.
    async fn is_email_assigned(&self, email: &str) -> Result<Option<Account>, AllocatorError>;

    /// Count of unassigned accounts. Eventually consistent with concurrent
    /// assignments; for "spots remaining" messaging only.
    async fn available_count(&self) -> Result<u64, AllocatorError>;

    /// Full pool dump, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<Account>, AllocatorError>;

    /// Clears assignment state on every account. Returns rows touched.
    /// Destructive; any confirmation UX belongs to the caller.
    async fn reset_all(&self) -> Result<u64, AllocatorError>;
}
