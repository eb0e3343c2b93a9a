use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Enforces "one account per email" at the store.
///
/// SQLite unique indexes treat NULLs as distinct, so any number of
/// unassigned rows coexist and a pool reset (which nulls `assigned_to`)
/// never trips the index. A racing second assignment for the same email
/// fails with a unique-constraint violation, which the account repository
/// reports as the email-taken outcome.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_beta_accounts_assigned_to_unique ON beta_accounts(assigned_to)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_survey_responses_email ON survey_responses(email)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_survey_responses_submitted_at ON survey_responses(submitted_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_survey_responses_submitted_at")
            .await?;

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_survey_responses_email")
            .await?;

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_beta_accounts_assigned_to_unique")
            .await?;

        Ok(())
    }
}
