//! External summarizer backends.
//!
//! The pipeline never depends on a backend being present: the analyzer asks
//! [`ExternalSummarizer::is_available`] first and falls back to extractive
//! summaries otherwise.

mod openai;

pub use openai::OpenAiSummarizer;

use crate::error::Result;
use async_trait::async_trait;

/// A summarizer with a fixed context budget, usually a local language model.
#[async_trait]
pub trait ExternalSummarizer: Send + Sync {
    /// Run one request. `input` holds the instruction followed by the text.
    ///
    /// Context overflow must be reported as
    /// [`BriefcastError::ContextBudgetExceeded`](crate::error::BriefcastError::ContextBudgetExceeded)
    /// so callers know not to retry it.
    async fn summarize_one(&self, input: &str) -> Result<String>;

    /// Whether the backend is reachable.
    async fn is_available(&self) -> bool;

    /// Short human-readable backend name.
    fn name(&self) -> &str;
}

/// Markers backends use when the request does not fit their context window.
const CONTEXT_OVERFLOW_MARKERS: &[&str] = &[
    "exceededContextWindowSize",
    "context_length_exceeded",
    "maximum context length",
    "context window",
];

/// Whether a backend error message reports a context overflow.
pub fn is_context_overflow(message: &str) -> bool {
    let lower = message.to_lowercase();
    CONTEXT_OVERFLOW_MARKERS
        .iter()
        .any(|marker| lower.contains(&marker.to_lowercase()))
}
