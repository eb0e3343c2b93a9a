use crate::config::PoolAccountConfig;
use crate::entities::{beta_accounts, prelude::*};
use crate::models::account::Account;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::{debug, info};

/// Outcome of a conditional assignment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The conditional write matched and this caller now owns the account.
    Assigned(Account),

    /// The account was already assigned when the write ran: either the
    /// caller lost a race or passed a stale id. Retry from `next_available`.
    AlreadyAssigned,

    /// The unique index on `assigned_to` rejected the write because the
    /// email already holds another account.
    EmailTaken,
}

/// Repository owning all mutation of beta account assignment state.
///
/// Returns raw `DbErr` rather than `anyhow` so the allocator service can
/// classify store failures without string matching.
pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_account_model(m: beta_accounts::Model) -> Account {
        Account {
            id: m.id,
            username: m.username,
            password: m.password,
            is_assigned: m.is_assigned,
            assigned_to: m.assigned_to,
            assigned_at: m.assigned_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    /// Seeds the pool from config, skipping usernames that already exist.
    /// Returns the number of rows inserted.
    pub async fn insert_missing(&self, accounts: &[PoolAccountConfig]) -> Result<u64, DbErr> {
        let existing: Vec<String> = BetaAccounts::find()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| m.username)
            .collect();

        let mut inserted = 0;
        for account in accounts {
            if existing.iter().any(|u| u == &account.username) {
                continue;
            }

            let now = chrono::Utc::now().to_rfc3339();
            let active_model = beta_accounts::ActiveModel {
                username: Set(account.username.clone()),
                password: Set(account.password.clone()),
                is_assigned: Set(false),
                assigned_to: Set(None),
                assigned_at: Set(None),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };

            BetaAccounts::insert(active_model)
                .on_conflict(
                    sea_orm::sea_query::OnConflict::column(beta_accounts::Column::Username)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;
            inserted += 1;
        }

        if inserted > 0 {
            info!("Provisioned {} new beta account(s)", inserted);
        }

        Ok(inserted)
    }

    /// First unassigned account, ordered by id ascending. The ordering is a
    /// documented contract: allocation order must be reproducible. This is
    /// advisory only; a concurrent `assign` can still win the row.
    pub async fn next_available(&self) -> Result<Option<Account>, DbErr> {
        let row = BetaAccounts::find()
            .filter(beta_accounts::Column::IsAssigned.eq(false))
            .order_by_asc(beta_accounts::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_account_model))
    }

    /// Conditionally binds `account_id` to `email`.
    ///
    /// A single UPDATE filtered on `is_assigned = false` gives compare-and-set
    /// semantics: two concurrent assigns for the same row yield exactly one
    /// `rows_affected == 1`. The unique index on `assigned_to` turns a racing
    /// second assignment for the same email into a constraint violation,
    /// mapped here to [`AssignOutcome::EmailTaken`].
    pub async fn assign(&self, account_id: i32, email: &str) -> Result<AssignOutcome, DbErr> {
        use sea_orm::sea_query::Expr;

        let now = chrono::Utc::now().to_rfc3339();
        let result = BetaAccounts::update_many()
            .col_expr(beta_accounts::Column::IsAssigned, Expr::value(true))
            .col_expr(beta_accounts::Column::AssignedTo, Expr::value(email))
            .col_expr(beta_accounts::Column::AssignedAt, Expr::value(now.clone()))
            .col_expr(beta_accounts::Column::UpdatedAt, Expr::value(now))
            .filter(beta_accounts::Column::Id.eq(account_id))
            .filter(beta_accounts::Column::IsAssigned.eq(false))
            .exec(&self.conn)
            .await;

        let result = match result {
            Ok(r) => r,
            Err(err) => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    debug!("Assignment rejected: email {} already holds an account", email);
                    return Ok(AssignOutcome::EmailTaken);
                }
                return Err(err);
            }
        };

        if result.rows_affected == 0 {
            return Ok(AssignOutcome::AlreadyAssigned);
        }

        let account = BetaAccounts::find_by_id(account_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("beta account {account_id} vanished after assign"))
            })?;

        info!(
            "Assigned beta account {} (id {}) to {}",
            account.username, account.id, email
        );

        Ok(AssignOutcome::Assigned(Self::map_account_model(account)))
    }

    /// Best-effort duplicate pre-check. The authoritative guard is the
    /// unique index consulted inside `assign`.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DbErr> {
        let row = BetaAccounts::find()
            .filter(beta_accounts::Column::AssignedTo.eq(email))
            .filter(beta_accounts::Column::IsAssigned.eq(true))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_account_model))
    }

    pub async fn available_count(&self) -> Result<u64, DbErr> {
        BetaAccounts::find()
            .filter(beta_accounts::Column::IsAssigned.eq(false))
            .count(&self.conn)
            .await
    }

    pub async fn total_count(&self) -> Result<u64, DbErr> {
        BetaAccounts::find().count(&self.conn).await
    }

    /// Full pool dump, ordered by id ascending.
    pub async fn list_all(&self) -> Result<Vec<Account>, DbErr> {
        let rows = BetaAccounts::find()
            .order_by_asc(beta_accounts::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_account_model).collect())
    }

    /// Clears assignment state on every row. Returns rows touched.
    pub async fn reset_all(&self) -> Result<u64, DbErr> {
        use sea_orm::sea_query::Expr;

        let now = chrono::Utc::now().to_rfc3339();
        let result = BetaAccounts::update_many()
            .col_expr(beta_accounts::Column::IsAssigned, Expr::value(false))
            .col_expr(
                beta_accounts::Column::AssignedTo,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                beta_accounts::Column::AssignedAt,
                Expr::value(Option::<String>::None),
            )
            .col_expr(beta_accounts::Column::UpdatedAt, Expr::value(now))
            .exec(&self.conn)
            .await?;

        info!("Reset assignment state on {} account(s)", result.rows_affected);

        Ok(result.rows_affected)
    }
}
