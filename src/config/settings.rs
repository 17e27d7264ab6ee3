//! Configuration settings for Briefcast.

use crate::error::{BriefcastError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub content: ContentSettings,
    pub summarizer: SummarizerSettings,
    pub storage: StorageSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.briefcast".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Content analysis and summary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Maximum summary length in characters.
    pub max_summary_length: usize,
    /// Language used for prompts when detection is inconclusive (es, en).
    pub summary_language: String,
    /// Try the external summarizer before the extractive one.
    pub use_external_summarizer: bool,
    /// Fall back to the extractive summary when the external summarizer fails.
    /// When off, a failed external run is reported as an unsuccessful result.
    pub extractive_fallback: bool,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            max_summary_length: 500,
            summary_language: "es".to_string(),
            use_external_summarizer: true,
            extractive_fallback: true,
        }
    }
}

/// External (OpenAI-compatible, usually on-device) summarizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Base URL of the OpenAI-compatible server.
    pub base_url: String,
    /// API key. Local servers ignore it.
    pub api_key: String,
    /// Model name sent with each request.
    pub model: String,
    /// Total context window in tokens (input + output).
    pub max_context_tokens: usize,
    /// Tokens reserved for the generated summary.
    pub max_output_tokens: usize,
    /// Sampling temperature.
    pub temperature: f32,
    /// Overlap between consecutive chunks, in tokens.
    pub chunk_overlap_tokens: usize,
    /// Characters per token used for estimation.
    pub chars_per_token: f64,
    /// Attempts per request before giving up.
    pub max_retries: u32,
    /// Fixed delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Maximum number of split-and-combine passes.
    pub max_depth: usize,
    /// HTTP timeout per request in seconds.
    pub timeout_secs: u64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11535/v1".to_string(),
            api_key: "not-needed".to_string(),
            model: "apple-on-device".to_string(),
            max_context_tokens: 4096,
            max_output_tokens: 500,
            temperature: 0.7,
            chunk_overlap_tokens: 200,
            chars_per_token: 3.5,
            max_retries: 3,
            retry_delay_ms: 1000,
            max_depth: 3,
            timeout_secs: 120,
        }
    }
}

impl SummarizerSettings {
    /// Largest input (in characters) that fits alongside the output budget.
    pub fn estimated_max_input_chars(&self) -> usize {
        let tokens = self.max_context_tokens.saturating_sub(self.max_output_tokens);
        (tokens as f64 * self.chars_per_token) as usize
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path to the SQLite database holding summaries and processing logs.
    pub sqlite_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.briefcast/briefcast.db".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check that budgets and URLs are usable.
    pub fn validate(&self) -> Result<()> {
        let s = &self.summarizer;
        if s.max_output_tokens >= s.max_context_tokens {
            return Err(BriefcastError::Config(format!(
                "summarizer.max_output_tokens ({}) must be smaller than max_context_tokens ({})",
                s.max_output_tokens, s.max_context_tokens
            )));
        }
        if s.chars_per_token <= 0.0 {
            return Err(BriefcastError::Config(
                "summarizer.chars_per_token must be positive".to_string(),
            ));
        }
        if s.max_depth == 0 {
            return Err(BriefcastError::Config(
                "summarizer.max_depth must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&s.base_url).map_err(|e| {
            BriefcastError::Config(format!("Invalid summarizer.base_url '{}': {}", s.base_url, e))
        })?;
        if self.content.max_summary_length == 0 {
            return Err(BriefcastError::Config(
                "content.max_summary_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BriefcastError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("briefcast")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.storage.sqlite_path)
    }
}
