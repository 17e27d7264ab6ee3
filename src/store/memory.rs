//! In-memory summary store.
//!
//! Useful for testing and one-off runs.

use super::{LogStatus, ProcessingLog, StoredSummary, SummaryStore};
use crate::error::{BriefcastError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory summary store.
#[derive(Default)]
pub struct MemorySummaryStore {
    summaries: RwLock<HashMap<String, StoredSummary>>,
    logs: RwLock<Vec<ProcessingLog>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> BriefcastError {
    BriefcastError::Storage(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn save_summary(&self, summary: &StoredSummary) -> Result<()> {
        let mut summaries = self.summaries.write().map_err(poisoned)?;
        summaries.insert(summary.item_id.clone(), summary.clone());
        Ok(())
    }

    async fn get_summary(&self, item_id: &str) -> Result<Option<StoredSummary>> {
        let summaries = self.summaries.read().map_err(poisoned)?;
        Ok(summaries.get(item_id).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<StoredSummary>> {
        let summaries = self.summaries.read().map_err(poisoned)?;
        let mut list: Vec<StoredSummary> = summaries.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn log_processing(
        &self,
        item_id: &str,
        action: &str,
        status: LogStatus,
        message: Option<&str>,
    ) -> Result<ProcessingLog> {
        let entry = ProcessingLog::new(item_id, action, status, message);
        self.logs.write().map_err(poisoned)?.push(entry.clone());
        Ok(entry)
    }

    async fn processing_logs(&self, item_id: &str) -> Result<Vec<ProcessingLog>> {
        let logs = self.logs.read().map_err(poisoned)?;
        Ok(logs.iter().filter(|l| l.item_id == item_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Language;
    use crate::summary::SummaryMethod;
    use chrono::{Duration, Utc};

    fn stored(item_id: &str, summary: &str) -> StoredSummary {
        StoredSummary {
            item_id: item_id.to_string(),
            title: None,
            summary: summary.to_string(),
            method: SummaryMethod::TraditionalExtractive,
            language: Language::En,
            compression_ratio: 2.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_replaces_previous_summary() {
        let store = MemorySummaryStore::new();
        store.save_summary(&stored("item-1", "first")).await.unwrap();
        store.save_summary(&stored("item-1", "second")).await.unwrap();

        let summary = store.get_summary("item-1").await.unwrap().unwrap();
        assert_eq!(summary.summary, "second");
        assert_eq!(store.list_summaries().await.unwrap().len(), 1);
        assert!(store.get_summary("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemorySummaryStore::new();
        let mut old = stored("old", "a");
        old.created_at = Utc::now() - Duration::hours(1);
        store.save_summary(&old).await.unwrap();
        store.save_summary(&stored("new", "b")).await.unwrap();

        let list = store.list_summaries().await.unwrap();
        assert_eq!(list[0].item_id, "new");
        assert_eq!(list[1].item_id, "old");
    }

    #[tokio::test]
    async fn test_processing_logs_per_item() {
        let store = MemorySummaryStore::new();
        store.log_processing("a", "summarize", LogStatus::Success, None).await.unwrap();
        store
            .log_processing("b", "summarize", LogStatus::Error, Some("backend down"))
            .await
            .unwrap();
        store.log_processing("a", "save", LogStatus::Success, None).await.unwrap();

        let logs = store.processing_logs("a").await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "summarize");
        assert_eq!(logs[1].action, "save");

        let logs = store.processing_logs("b").await.unwrap();
        assert_eq!(logs[0].message.as_deref(), Some("backend down"));
    }
}
