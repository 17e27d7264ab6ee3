//! Summary generation without a language model, plus the result types shared
//! by every summarization path.
//!
//! Two strategies live here:
//!
//! - [`summarize_traditional`] scores paragraphs and keeps the most relevant ones.
//! - [`summarize_simple`] takes the leading paragraphs or sentences when the
//!   text has too little structure to score.

mod extractive;
mod simple;

pub use extractive::{summarize_traditional, ExtractiveSummary};
pub use simple::summarize_simple;

use crate::analysis::{analyze_structure, char_len, TextStats};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Share of `max_length` a sentence end must pass to be used as the cut point.
const SENTENCE_BACKOFF_RATIO: f64 = 0.7;

/// How a summary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMethod {
    /// The external summarizer handled the whole text in one call.
    Direct,
    /// The text was chunked, summarized per chunk and recombined.
    #[serde(alias = "chunked_hierarchical")]
    Hierarchical,
    /// Paragraph scoring.
    TraditionalExtractive,
    /// Leading paragraphs or sentences.
    SimpleFallback,
}

impl std::fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMethod::Direct => write!(f, "direct"),
            SummaryMethod::Hierarchical => write!(f, "hierarchical"),
            SummaryMethod::TraditionalExtractive => write!(f, "traditional_extractive"),
            SummaryMethod::SimpleFallback => write!(f, "simple_fallback"),
        }
    }
}

impl std::str::FromStr for SummaryMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "direct" => Ok(SummaryMethod::Direct),
            "hierarchical" | "chunked_hierarchical" => Ok(SummaryMethod::Hierarchical),
            "traditional_extractive" => Ok(SummaryMethod::TraditionalExtractive),
            "simple_fallback" => Ok(SummaryMethod::SimpleFallback),
            _ => Err(format!("Unknown summary method: {}", s)),
        }
    }
}

/// Outcome of one summarization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub method: SummaryMethod,
    pub chunks_processed: usize,
    /// `len(original) / len(summary)`, zero when the summary is empty.
    pub compression_ratio: f64,
    pub success: bool,
    pub words_in_summary: usize,
    /// Estimated tokens of the original text.
    pub estimated_tokens: usize,
    pub processing_time_ms: u64,
    /// Why the summary failed, when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResult {
    /// Successful result for `summary` produced from `original`.
    pub fn new(original: &str, summary: String, method: SummaryMethod, chunks_processed: usize) -> Self {
        let summary_len = char_len(&summary);
        let compression_ratio = if summary_len == 0 {
            0.0
        } else {
            char_len(original) as f64 / summary_len as f64
        };

        Self {
            words_in_summary: summary.split_whitespace().count(),
            summary,
            method,
            chunks_processed,
            compression_ratio,
            success: true,
            estimated_tokens: 0,
            processing_time_ms: 0,
            error: None,
        }
    }

    /// Failed result with no summary text.
    pub fn failed(method: SummaryMethod, chunks_processed: usize, reason: impl Into<String>) -> Self {
        Self {
            summary: String::new(),
            method,
            chunks_processed,
            compression_ratio: 0.0,
            success: false,
            words_in_summary: 0,
            estimated_tokens: 0,
            processing_time_ms: 0,
            error: Some(reason.into()),
        }
    }

    pub fn with_estimated_tokens(mut self, tokens: usize) -> Self {
        self.estimated_tokens = tokens;
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.processing_time_ms = elapsed.as_millis() as u64;
        self
    }
}

/// Side-by-side statistics of an original text and its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentComparison {
    pub original_stats: TextStats,
    pub summary_stats: TextStats,
    /// Summary length as a percentage of the original length.
    pub compression_percent: f64,
    pub words_reduced: i64,
    pub reading_time_saved_minutes: f64,
}

/// Compare an original text with its summary.
pub fn compare(original: &str, summary: &str) -> ContentComparison {
    let original_stats = analyze_structure(original);
    let summary_stats = analyze_structure(summary);

    let original_len = char_len(original);
    let compression_percent = if original_len == 0 {
        0.0
    } else {
        char_len(summary) as f64 / original_len as f64 * 100.0
    };

    ContentComparison {
        original_stats,
        summary_stats,
        compression_percent,
        words_reduced: original_stats.word_count as i64 - summary_stats.word_count as i64,
        reading_time_saved_minutes: original_stats.reading_time_minutes
            - summary_stats.reading_time_minutes,
    }
}

/// Cut `text` to `max_length` characters.
///
/// When the cut lands mid-sentence and the last sentence end inside the cut
/// lies beyond 70% of `max_length`, the text ends there instead.
pub fn truncate_at_sentence(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    let last_end = cut
        .chars()
        .enumerate()
        .filter(|(_, c)| matches!(c, '.' | '!' | '?'))
        .map(|(i, _)| i)
        .last();

    match last_end {
        Some(i) if i as f64 > max_length as f64 * SENTENCE_BACKOFF_RATIO => {
            cut.chars().take(i + 1).collect()
        }
        _ => cut,
    }
}

/// Cut `text` to `max_length` characters, preferring a word boundary.
pub(crate) fn truncate_at_word(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => cut[..pos].trim_end().to_string(),
        _ => cut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_at_sentence("Short.", 50), "Short.");
    }

    #[test]
    fn test_truncate_backs_off_to_late_sentence_end() {
        let text = "This sentence ends late enough. Then more text keeps going on";
        let out = truncate_at_sentence(text, 40);
        assert_eq!(out, "This sentence ends late enough.");
    }

    #[test]
    fn test_truncate_keeps_hard_cut_when_sentence_end_is_early() {
        let text = "Hola mundo. Este es un ejemplo de texto de prueba con varias palabras.";
        let out = truncate_at_sentence(text, 50);
        assert_eq!(char_len(&out), 50);
        assert!(out.starts_with("Hola mundo. Este"));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "ñ".repeat(30);
        assert_eq!(char_len(&truncate_at_sentence(&text, 10)), 10);
    }

    #[test]
    fn test_truncate_at_word() {
        assert_eq!(truncate_at_word("alpha beta gamma", 12), "alpha beta");
        assert_eq!(truncate_at_word("alphabetagamma", 5), "alpha");
    }

    #[test]
    fn test_compression_ratio() {
        let result = SummaryResult::new("abcdefghij", "abcde".to_string(), SummaryMethod::Direct, 1);
        assert!((result.compression_ratio - 2.0).abs() < f64::EPSILON);
        assert!(result.success);

        let empty = SummaryResult::new("abc", String::new(), SummaryMethod::SimpleFallback, 0);
        assert_eq!(empty.compression_ratio, 0.0);
    }

    #[test]
    fn test_compare() {
        let original = "one two three four. five six seven eight.";
        let summary = "one two three four.";
        let cmp = compare(original, summary);
        assert_eq!(cmp.words_reduced, 4);
        assert!(cmp.compression_percent > 40.0 && cmp.compression_percent < 50.0);
        assert!(cmp.reading_time_saved_minutes > 0.0);
    }

    #[test]
    fn test_method_serde_names() {
        assert_eq!(serde_json::to_string(&SummaryMethod::Hierarchical).unwrap(), "\"hierarchical\"");
        let parsed: SummaryMethod = serde_json::from_str("\"chunked_hierarchical\"").unwrap();
        assert_eq!(parsed, SummaryMethod::Hierarchical);
        assert_eq!(SummaryMethod::TraditionalExtractive.to_string(), "traditional_extractive");
    }
}
