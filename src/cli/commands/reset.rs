use crate::config::Config;
use crate::db::Store;

pub async fn cmd_reset(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let total = store.total_account_count().await?;
    let available = store.available_account_count().await?;
    let assigned = total - available;

    if assigned == 0 {
        println!("No accounts are assigned; nothing to reset.");
        return Ok(());
    }

    println!("Return all {assigned} assigned account(s) to the pool?");
    println!("Assigned emails will be able to sign up again.");
    println!("Enter 'y' to confirm, anything else to cancel:");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        let cleared = store.reset_accounts().await?;
        println!("✓ Reset {cleared} account(s).");
    } else {
        println!("Cancelled.");
    }

    Ok(())
}
