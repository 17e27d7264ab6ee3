//! SQLite-based summary store.

use super::{LogStatus, ProcessingLog, StoredSummary, SummaryStore};
use crate::error::{BriefcastError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summaries (
    item_id TEXT PRIMARY KEY,
    title TEXT,
    summary TEXT NOT NULL,
    method TEXT NOT NULL,
    language TEXT NOT NULL,
    compression_ratio REAL NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_summaries_created_at ON summaries(created_at);

CREATE TABLE IF NOT EXISTS processing_logs (
    id TEXT PRIMARY KEY,
    item_id TEXT NOT NULL,
    action TEXT NOT NULL,
    status TEXT NOT NULL,
    message TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_processing_logs_item_id ON processing_logs(item_id);
"#;

/// SQLite-based summary store.
pub struct SqliteSummaryStore {
    conn: Mutex<Connection>,
}

impl SqliteSummaryStore {
    /// Open (or create) the database at `path`.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite summary store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| BriefcastError::Storage(format!("Failed to acquire lock: {}", e)))
    }

    fn parse_time(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }

    fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<StoredSummary> {
        let method: String = row.get(3)?;
        let language: String = row.get(4)?;
        let created_at: String = row.get(6)?;

        Ok(StoredSummary {
            item_id: row.get(0)?,
            title: row.get(1)?,
            summary: row.get(2)?,
            method: method.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
            })?,
            language: language.parse().unwrap_or_default(),
            compression_ratio: row.get(5)?,
            created_at: Self::parse_time(&created_at),
        })
    }

    fn log_from_row(row: &Row<'_>) -> rusqlite::Result<ProcessingLog> {
        let id: String = row.get(0)?;
        let status: String = row.get(3)?;
        let created_at: String = row.get(5)?;

        Ok(ProcessingLog {
            id: uuid::Uuid::parse_str(&id).unwrap_or_default(),
            item_id: row.get(1)?,
            action: row.get(2)?,
            status: status.parse().unwrap_or(LogStatus::Warning),
            message: row.get(4)?,
            created_at: Self::parse_time(&created_at),
        })
    }
}

#[async_trait]
impl SummaryStore for SqliteSummaryStore {
    #[instrument(skip(self, summary), fields(item_id = %summary.item_id))]
    async fn save_summary(&self, summary: &StoredSummary) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO summaries
            (item_id, title, summary, method, language, compression_ratio, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                summary.item_id,
                summary.title,
                summary.summary,
                summary.method.to_string(),
                summary.language.to_string(),
                summary.compression_ratio,
                summary.created_at.to_rfc3339(),
            ],
        )?;

        debug!("Saved summary for {}", summary.item_id);
        Ok(())
    }

    async fn get_summary(&self, item_id: &str) -> Result<Option<StoredSummary>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT item_id, title, summary, method, language, compression_ratio, created_at
            FROM summaries WHERE item_id = ?1
            "#,
            params![item_id],
            Self::summary_from_row,
        );

        match result {
            Ok(summary) => Ok(Some(summary)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_summaries(&self) -> Result<Vec<StoredSummary>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT item_id, title, summary, method, language, compression_ratio, created_at
            FROM summaries ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], Self::summary_from_row)?;
        let summaries = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    #[instrument(skip(self, message))]
    async fn log_processing(
        &self,
        item_id: &str,
        action: &str,
        status: LogStatus,
        message: Option<&str>,
    ) -> Result<ProcessingLog> {
        let entry = ProcessingLog::new(item_id, action, status, message);
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO processing_logs (id, item_id, action, status, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                entry.id.to_string(),
                entry.item_id,
                entry.action,
                entry.status.to_string(),
                entry.message,
                entry.created_at.to_rfc3339(),
            ],
        )?;

        Ok(entry)
    }

    async fn processing_logs(&self, item_id: &str) -> Result<Vec<ProcessingLog>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, item_id, action, status, message, created_at
            FROM processing_logs WHERE item_id = ?1 ORDER BY created_at ASC, rowid ASC
            "#,
        )?;

        let rows = stmt.query_map(params![item_id], Self::log_from_row)?;
        let logs = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs)
    }
}
