//! Analyze command implementation.

use crate::analyzer::{ContentAnalysis, ContentAnalyzer};
use crate::cli::{read_input, Output};
use crate::config::Settings;
use crate::store::{LogStatus, SqliteSummaryStore, StoredSummary, SummaryStore};
use crate::summary::{SummaryMethod, SummaryResult};
use anyhow::Result;

/// Flags of the analyze command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub title: Option<String>,
    pub max_length: Option<usize>,
    pub no_external: bool,
    pub no_fallback: bool,
    pub json: bool,
    pub save: Option<String>,
}

/// Run the analyze command.
pub async fn run_analyze(input: &str, options: AnalyzeOptions, mut settings: Settings) -> Result<()> {
    let text = read_input(input)?;

    if let Some(max_length) = options.max_length {
        settings.content.max_summary_length = max_length;
    }
    if options.no_external {
        settings.content.use_external_summarizer = false;
    }
    if options.no_fallback {
        settings.content.extractive_fallback = false;
    }

    let analyzer = ContentAnalyzer::new(&settings)?;

    let spinner = (!options.json).then(|| Output::spinner("Analyzing content..."));
    let result = analyzer
        .analyze_and_summarize(&text, options.title.as_deref())
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            Output::error(&format!("Summarization failed: {}", e));
            return Err(e.into());
        }
    };

    if let Some(item_id) = &options.save {
        let store = SqliteSummaryStore::new(&settings.sqlite_path())?;
        store
            .save_summary(&StoredSummary::from_analysis(item_id, options.title.as_deref(), &result))
            .await?;
        let (status, message) = processing_status(
            &result.summary,
            settings.content.use_external_summarizer && !text.trim().is_empty(),
        );
        store
            .log_processing(item_id, "summarize", status, Some(&message))
            .await?;
        if !options.json {
            Output::success(&format!("Saved summary as {}", item_id));
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_analysis(&analyzer, &text, &result);
    }

    Ok(())
}

/// Log status for a summary: `Warning` when an external run fell back to an
/// extractive method, `Error` when no summary was produced.
fn processing_status(summary: &SummaryResult, external_requested: bool) -> (LogStatus, String) {
    if !summary.success {
        let reason = summary.error.as_deref().unwrap_or("unknown error");
        return (LogStatus::Error, format!("method {} failed: {}", summary.method, reason));
    }

    let extractive = matches!(
        summary.method,
        SummaryMethod::TraditionalExtractive | SummaryMethod::SimpleFallback
    );
    if external_requested && extractive {
        (
            LogStatus::Warning,
            format!("external summarizer not used, fell back to {}", summary.method),
        )
    } else {
        (LogStatus::Success, format!("method {}", summary.method))
    }
}

fn print_analysis(analyzer: &ContentAnalyzer, text: &str, result: &ContentAnalysis) {
    let analysis = &result.analysis;
    let summary = &result.summary;

    Output::header("Analysis");
    Output::kv("Language", &analysis.language.to_string());
    Output::kv("Characters", &analysis.original_length.to_string());
    Output::kv("Words", &analysis.stats.word_count.to_string());
    Output::kv("Sentences", &analysis.stats.sentence_count.to_string());
    Output::kv("Paragraphs", &analysis.stats.paragraph_count.to_string());
    Output::kv(
        "Reading time",
        &format!("{:.1} min", analysis.stats.reading_time_minutes),
    );

    if !analysis.key_phrases.is_empty() {
        Output::header("Key phrases");
        for phrase in &analysis.key_phrases {
            Output::list_item(phrase);
        }
    }

    Output::header("Summary");
    if !summary.success {
        Output::error(&format!(
            "Summarization failed: {}",
            summary.error.as_deref().unwrap_or("unknown error")
        ));
        return;
    }
    if summary.summary.is_empty() {
        Output::warning("Nothing to summarize.");
        return;
    }
    println!("{}\n", summary.summary);

    Output::kv("Method", &summary.method.to_string());
    if summary.chunks_processed > 1 {
        Output::kv("Chunks", &summary.chunks_processed.to_string());
    }
    Output::kv("Compression ratio", &format!("{:.2}", summary.compression_ratio));
    Output::kv("Time", &format!("{} ms", summary.processing_time_ms));

    let comparison = analyzer.compare(text, &summary.summary);
    Output::kv(
        "Length",
        &format!("{:.1}% of original", comparison.compression_percent),
    );
    Output::kv("Words reduced", &comparison.words_reduced.to_string());
    Output::kv(
        "Reading time saved",
        &format!("{:.1} min", comparison.reading_time_saved_minutes),
    );
}
