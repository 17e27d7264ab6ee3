//! Status command implementation.

use crate::analyzer::ContentAnalyzer;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Run the status command.
pub async fn run_status(settings: Settings) -> Result<()> {
    let analyzer = ContentAnalyzer::new(&settings)?;

    let spinner = Output::spinner("Checking external summarizer...");
    let status = analyzer.status().await;
    spinner.finish_and_clear();

    Output::header("Summarizers");
    Output::kv("Traditional", yes_no(status.traditional_available));
    Output::kv("External enabled", yes_no(status.external_enabled));
    Output::kv("External available", yes_no(status.external_available));

    Output::header("Backend");
    Output::kv("URL", &status.backend.base_url);
    Output::kv("Model", &status.backend.model);
    Output::kv("Context", &format!("{} tokens", status.backend.max_context_tokens));
    Output::kv("Output", &format!("{} tokens", status.backend.max_output_tokens));
    Output::kv(
        "Max input",
        &format!("~{} chars", status.backend.estimated_max_input_chars),
    );

    if status.external_enabled && !status.external_available {
        println!();
        Output::warning("External summarizer not reachable; summaries will be extractive.");
    }

    Ok(())
}
