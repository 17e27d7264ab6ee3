//! History command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{SqliteSummaryStore, SummaryStore};
use anyhow::Result;

/// Run the history command.
pub async fn run_history(item_id: Option<&str>, settings: Settings) -> Result<()> {
    let store = SqliteSummaryStore::new(&settings.sqlite_path())?;

    let Some(item_id) = item_id else {
        let summaries = store.list_summaries().await?;
        if summaries.is_empty() {
            Output::info("No summaries stored yet. Use 'briefcast analyze <file> --save <id>'.");
        } else {
            Output::header(&format!("Stored summaries ({})", summaries.len()));
            println!();
            for summary in &summaries {
                Output::summary_entry(summary);
            }
        }
        return Ok(());
    };

    match store.get_summary(item_id).await? {
        Some(summary) => {
            Output::header(summary.title.as_deref().unwrap_or(item_id));
            Output::kv("Item", &summary.item_id);
            Output::kv("Method", &summary.method.to_string());
            Output::kv("Language", &summary.language.to_string());
            Output::kv("Compression ratio", &format!("{:.2}", summary.compression_ratio));
            Output::kv("Created", &summary.created_at.to_rfc3339());
            println!("\n{}", summary.summary);
        }
        None => Output::warning(&format!("No summary stored for {}", item_id)),
    }

    let logs = store.processing_logs(item_id).await?;
    if !logs.is_empty() {
        Output::header("Processing log");
        for log in &logs {
            Output::list_item(&format!(
                "{} {} [{}]{}",
                log.created_at.format("%Y-%m-%d %H:%M:%S"),
                log.action,
                log.status,
                log.message
                    .as_deref()
                    .map(|m| format!(" {}", m))
                    .unwrap_or_default()
            ));
        }
    }

    Ok(())
}
