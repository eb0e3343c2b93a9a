//! Submissions command handler

use crate::config::Config;
use crate::constants::limits;
use crate::db::Store;

pub async fn cmd_submissions(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let limit = limit.clamp(1, limits::MAX_LIST_LIMIT);
    let submissions = store.recent_submissions(limit).await?;

    if submissions.is_empty() {
        println!("No survey submissions yet.");
        return Ok(());
    }

    println!("Recent Submissions ({} shown)", submissions.len());
    println!("{:-<70}", "");

    for submission in submissions {
        println!("{} <{}>", submission.name, submission.email);
        println!(
            "  #{} | {} | account: {} | follow-up: {}",
            submission.id,
            submission.submitted_at,
            submission
                .assigned_account_id
                .map_or_else(|| "none".to_string(), |id| id.to_string()),
            if submission.accept_follow_up {
                "yes"
            } else {
                "no"
            },
        );
    }

    Ok(())
}
