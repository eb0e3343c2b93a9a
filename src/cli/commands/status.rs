//! Status command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    store.initialize_pool(config).await?;

    let total = store.total_account_count().await?;
    let available = store.available_account_count().await?;
    let submissions = store.submission_count().await?;

    println!("Betapool status");
    println!("{:-<40}", "");
    println!("Accounts total:     {total}");
    println!("Accounts assigned:  {}", total - available);
    println!("Accounts available: {available}");
    println!("Survey submissions: {submissions}");

    if available == 0 {
        println!();
        println!("The pool is exhausted. New signups will be turned away.");
    } else if available <= config.pool.low_watermark {
        println!();
        println!("Only {available} spot(s) left.");
    }

    Ok(())
}
