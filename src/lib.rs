//! Briefcast - Content analysis and summarization
//!
//! A local-first library and CLI that analyzes text and produces summaries,
//! using a local language model when one is reachable and extractive
//! heuristics otherwise.
//!
//! # Overview
//!
//! Briefcast allows you to:
//! - Detect whether a text is Spanish or English
//! - Compute word, sentence and paragraph statistics and reading time
//! - Extract key sentences
//! - Summarize texts of any length against a fixed token budget
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `analysis` - Language detection, statistics and key phrases
//! - `summary` - Extractive summarizers and result types
//! - `chunking` - Token-budget chunking
//! - `llm` - External summarizer backends
//! - `hierarchical` - Chunk-and-combine summarization with retries
//! - `analyzer` - Pipeline coordination
//! - `store` - Summary persistence
//!
//! # Example
//!
//! ```rust,no_run
//! use briefcast::analyzer::ContentAnalyzer;
//! use briefcast::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let analyzer = ContentAnalyzer::new(&settings)?;
//!
//!     let text = std::fs::read_to_string("article.txt")?;
//!     let result = analyzer.analyze_and_summarize(&text, Some("Article")).await?;
//!     println!("[{}] {}", result.summary.method, result.summary.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod analyzer;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod hierarchical;
pub mod llm;
pub mod openai;
pub mod store;
pub mod summary;

pub use error::{BriefcastError, Result};
