//! CLI output formatting utilities.

use crate::store::StoredSummary;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a stored summary as a one-line entry.
    pub fn summary_entry(summary: &StoredSummary) {
        println!(
            "  {} {} ({}, {}, {})",
            style("*").cyan(),
            style(summary.title.as_deref().unwrap_or(&summary.item_id)).bold(),
            style(&summary.item_id).dim(),
            summary.method,
            summary.created_at.format("%Y-%m-%d %H:%M"),
        );
        println!("    {}", content_preview(&summary.summary, 120));
    }

    /// Print a chunk boundary line.
    pub fn chunk_info(index: usize, start: usize, end: usize, tokens: usize, preview: &str) {
        println!(
            "  {} chars {}..{} (~{} tokens)",
            style(format!("#{}", index + 1)).cyan().bold(),
            start,
            end,
            tokens
        );
        println!("     {}", style(content_preview(preview, 80)).dim());
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Single-line preview with ellipsis, cut on a character boundary.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
