//! Accounts command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_accounts(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    store.initialize_pool(config).await?;

    let accounts = store.list_accounts().await?;

    if accounts.is_empty() {
        println!("No beta accounts provisioned.");
        println!();
        println!("Add accounts under [[pool.accounts]] in config.toml.");
        return Ok(());
    }

    println!("Beta Accounts ({} total)", accounts.len());
    println!("{:-<70}", "");

    for account in accounts {
        if account.is_assigned {
            println!(
                "✓ {} -> {} ({})",
                account.username,
                account.assigned_to.as_deref().unwrap_or("?"),
                account.assigned_at.as_deref().unwrap_or("unknown time"),
            );
        } else {
            println!("• {} (available)", account.username);
        }
    }

    Ok(())
}
