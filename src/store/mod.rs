//! Summary persistence for Briefcast.
//!
//! The summarization pipeline never touches storage; the CLI uses a
//! [`SummaryStore`] to keep finished summaries and a processing log per item.

mod memory;
mod sqlite;

pub use memory::MemorySummaryStore;
pub use sqlite::SqliteSummaryStore;

use crate::analysis::Language;
use crate::analyzer::ContentAnalysis;
use crate::error::Result;
use crate::summary::SummaryMethod;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished summary keyed by an opaque content-item identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSummary {
    pub item_id: String,
    pub title: Option<String>,
    pub summary: String,
    pub method: SummaryMethod,
    pub language: Language,
    pub compression_ratio: f64,
    pub created_at: DateTime<Utc>,
}

impl StoredSummary {
    /// Record the summary part of an analysis under `item_id`.
    pub fn from_analysis(item_id: &str, title: Option<&str>, analysis: &ContentAnalysis) -> Self {
        Self {
            item_id: item_id.to_string(),
            title: title.map(str::to_string),
            summary: analysis.summary.summary.clone(),
            method: analysis.summary.method,
            language: analysis.analysis.language,
            compression_ratio: analysis.summary.compression_ratio,
            created_at: Utc::now(),
        }
    }
}

/// Outcome recorded for a processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStatus::Success => write!(f, "success"),
            LogStatus::Warning => write!(f, "warning"),
            LogStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "success" => Ok(LogStatus::Success),
            "warning" => Ok(LogStatus::Warning),
            "error" => Ok(LogStatus::Error),
            _ => Err(format!("Unknown log status: {}", s)),
        }
    }
}

/// One entry of an item's processing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLog {
    pub id: Uuid,
    pub item_id: String,
    pub action: String,
    pub status: LogStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProcessingLog {
    pub fn new(item_id: &str, action: &str, status: LogStatus, message: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: item_id.to_string(),
            action: action.to_string(),
            status,
            message: message.map(str::to_string),
            created_at: Utc::now(),
        }
    }
}

/// Trait for summary store implementations.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Store a summary, replacing any previous one for the same item.
    async fn save_summary(&self, summary: &StoredSummary) -> Result<()>;

    /// Get the summary of an item.
    async fn get_summary(&self, item_id: &str) -> Result<Option<StoredSummary>>;

    /// All summaries, newest first.
    async fn list_summaries(&self) -> Result<Vec<StoredSummary>>;

    /// Append an entry to an item's processing log.
    async fn log_processing(
        &self,
        item_id: &str,
        action: &str,
        status: LogStatus,
        message: Option<&str>,
    ) -> Result<ProcessingLog>;

    /// Processing log of an item, oldest first.
    async fn processing_logs(&self, item_id: &str) -> Result<Vec<ProcessingLog>>;
}
