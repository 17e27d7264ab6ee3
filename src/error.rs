//! Error types for Briefcast.

use thiserror::Error;

/// Library-level error type for Briefcast operations.
#[derive(Error, Debug)]
pub enum BriefcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("External summarizer unavailable: {0}")]
    SummarizerUnavailable(String),

    #[error("Context budget exceeded: {0}")]
    ContextBudgetExceeded(String),

    #[error("No chunks summarized ({chunks} attempted)")]
    AllChunksFailed { chunks: usize },

    #[error("Combined summaries still exceed the context budget after {depth} passes")]
    RecursionLimit { depth: usize },

    #[error("Summarization cancelled")]
    Cancelled,

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl BriefcastError {
    /// Whether repeating the same call could succeed.
    ///
    /// Context overflow is deterministic for a given input, so it is never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BriefcastError::Summarizer(_) | BriefcastError::Http(_) | BriefcastError::Io(_)
        )
    }
}

/// Result type alias for Briefcast operations.
pub type Result<T> = std::result::Result<T, BriefcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(BriefcastError::Summarizer("timeout".into()).is_retryable());
        assert!(!BriefcastError::ContextBudgetExceeded("chunk".into()).is_retryable());
        assert!(!BriefcastError::Cancelled.is_retryable());
        assert!(!BriefcastError::SummarizerUnavailable("down".into()).is_retryable());
    }
}
