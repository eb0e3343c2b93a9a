use crate::models::account::Account;
use crate::models::submission::{NewSubmission, Submission};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::account::AssignOutcome;

/// Facade over the SQLite store. The shared connection pool behind it is the
/// only synchronization point between concurrent signup requests.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn submission_repo(&self) -> repositories::submission::SubmissionRepository {
        repositories::submission::SubmissionRepository::new(self.conn.clone())
    }

    /// Syncs the configured account pool into the table, insert-missing by
    /// username. Existing rows (and their assignment state) are untouched.
    pub async fn initialize_pool(&self, config: &crate::config::Config) -> Result<u64> {
        let inserted = self.account_repo().insert_missing(&config.pool.accounts).await?;
        Ok(inserted)
    }

    pub async fn next_available(&self) -> Result<Option<Account>, DbErr> {
        self.account_repo().next_available().await
    }

    pub async fn assign_account(
        &self,
        account_id: i32,
        email: &str,
    ) -> Result<AssignOutcome, DbErr> {
        self.account_repo().assign(account_id, email).await
    }

    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DbErr> {
        self.account_repo().find_by_email(email).await
    }

    pub async fn available_account_count(&self) -> Result<u64, DbErr> {
        self.account_repo().available_count().await
    }

    pub async fn total_account_count(&self) -> Result<u64, DbErr> {
        self.account_repo().total_count().await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, DbErr> {
        self.account_repo().list_all().await
    }

    pub async fn reset_accounts(&self) -> Result<u64, DbErr> {
        self.account_repo().reset_all().await
    }

    pub async fn record_submission(
        &self,
        submission: &NewSubmission,
        assigned_account_id: Option<i32>,
    ) -> Result<i32> {
        self.submission_repo()
            .record(submission, assigned_account_id)
            .await
    }

    pub async fn recent_submissions(&self, limit: u64) -> Result<Vec<Submission>> {
        self.submission_repo().recent(limit).await
    }

    pub async fn submission_count(&self) -> Result<u64> {
        self.submission_repo().count().await
    }
}
