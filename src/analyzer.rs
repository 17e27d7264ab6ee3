//! Pipeline coordinator for Briefcast.
//!
//! Analyzes a text, then summarizes it with the external summarizer when one
//! is enabled and reachable, falling back to the extractive summarizers.

use crate::analysis::{self, char_len, AnalysisResult, Language};
use crate::chunking::TokenBudget;
use crate::config::{ContentSettings, Prompts, Settings, SummarizerSettings};
use crate::error::{BriefcastError, Result};
use crate::hierarchical::{CombinedSummary, HierarchicalSummarizer, DEFAULT_COMBINE_MAX_WORDS};
use crate::llm::{ExternalSummarizer, OpenAiSummarizer};
use crate::summary::{
    summarize_traditional, truncate_at_sentence, ContentComparison, SummaryMethod, SummaryResult,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Analysis and summary of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub analysis: AnalysisResult,
    pub summary: SummaryResult,
}

/// Which summarizers can currently be used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerStatus {
    /// The extractive path needs no backend.
    pub traditional_available: bool,
    pub external_enabled: bool,
    pub external_available: bool,
    pub backend: BackendStatus,
}

/// Configuration of the external backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub name: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_context_tokens: usize,
    pub max_output_tokens: usize,
    pub estimated_max_input_chars: usize,
}

/// Coordinates analysis and summarization.
pub struct ContentAnalyzer {
    content: ContentSettings,
    summarizer: SummarizerSettings,
    prompts: Prompts,
    external: Option<Arc<dyn ExternalSummarizer>>,
    external_enabled: bool,
}

impl ContentAnalyzer {
    /// Create an analyzer from settings, connecting to the configured backend lazily.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let external: Arc<dyn ExternalSummarizer> = Arc::new(OpenAiSummarizer::new(&settings.summarizer)?);

        Ok(Self::with_components(settings, prompts, Some(external)))
    }

    /// Create an analyzer with an injected backend (or none).
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        external: Option<Arc<dyn ExternalSummarizer>>,
    ) -> Self {
        Self {
            content: settings.content.clone(),
            summarizer: settings.summarizer.clone(),
            prompts,
            external,
            external_enabled: settings.content.use_external_summarizer,
        }
    }

    /// Enable or disable the external summarizer for later requests.
    pub fn set_external_enabled(&mut self, enabled: bool) {
        self.external_enabled = enabled;
        info!(
            "External summarizer {} for summaries",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn external_enabled(&self) -> bool {
        self.external_enabled
    }

    pub fn max_summary_length(&self) -> usize {
        self.content.max_summary_length
    }

    /// Analyze `text` and summarize it.
    ///
    /// Never fails because of the backend: unavailability and errors fall back
    /// to the extractive path, or yield an unsuccessful [`SummaryResult`] when
    /// `content.extractive_fallback` is off.
    pub async fn analyze_and_summarize(&self, text: &str, title: Option<&str>) -> Result<ContentAnalysis> {
        self.analyze_and_summarize_with_cancel(text, title, Arc::new(AtomicBool::new(false)))
            .await
    }

    /// Like [`analyze_and_summarize`](Self::analyze_and_summarize), stopping with
    /// [`BriefcastError::Cancelled`] once `cancel` is set. The flag only affects
    /// this request.
    #[instrument(skip_all, fields(chars = char_len(text), has_title = title.is_some()))]
    pub async fn analyze_and_summarize_with_cancel(
        &self,
        text: &str,
        title: Option<&str>,
        cancel: Arc<AtomicBool>,
    ) -> Result<ContentAnalysis> {
        let started = Instant::now();

        if text.trim().is_empty() {
            return Ok(ContentAnalysis {
                analysis: AnalysisResult::empty(char_len(text)),
                summary: SummaryResult::new(text, String::new(), SummaryMethod::SimpleFallback, 0)
                    .with_elapsed(started.elapsed()),
            });
        }

        let analysis = analysis::analyze(text);
        info!(
            "Analyzed {} words, language {}, {} key phrases",
            analysis.stats.word_count,
            analysis.language,
            analysis.key_phrases.len()
        );

        let max_length = self.content.max_summary_length;
        let estimated_tokens = TokenBudget::from(&self.summarizer).estimate_tokens(text);

        let summary = match self.summarize_external(text, title, &analysis, cancel).await {
            Ok(combined) => {
                info!("Summary generated by external summarizer");
                SummaryResult::new(
                    text,
                    truncate_at_sentence(&combined.summary, max_length),
                    combined.method,
                    combined.chunks_processed,
                )
            }
            Err(BriefcastError::Cancelled) => return Err(BriefcastError::Cancelled),
            // Unavailability always falls back; only failed runs can be surfaced.
            Err(e)
                if !self.content.extractive_fallback
                    && !matches!(e, BriefcastError::SummarizerUnavailable(_)) =>
            {
                warn!("External summarizer failed and fallback is disabled: {}", e);
                failed_summary(&e)
            }
            Err(e) => {
                match e {
                    BriefcastError::SummarizerUnavailable(reason) if !self.external_enabled => {
                        debug!("External summarizer {}, using traditional summary", reason)
                    }
                    BriefcastError::SummarizerUnavailable(reason) => {
                        warn!("External summarizer unavailable ({}), using traditional summary", reason)
                    }
                    e => warn!("External summarizer failed ({}), using traditional summary", e),
                }
                let extractive = summarize_traditional(
                    text,
                    title,
                    analysis.language,
                    &analysis.key_phrases,
                    max_length,
                );
                SummaryResult::new(text, extractive.text, extractive.method, 0)
            }
        };

        let summary = summary
            .with_estimated_tokens(estimated_tokens)
            .with_elapsed(started.elapsed());
        info!(
            "Summary generated with {} ({} chars, ratio {:.2})",
            summary.method,
            char_len(&summary.summary),
            summary.compression_ratio
        );

        Ok(ContentAnalysis { analysis, summary })
    }

    /// Run the external summarizer.
    ///
    /// Returns [`BriefcastError::SummarizerUnavailable`] when it is disabled,
    /// missing or unreachable.
    async fn summarize_external(
        &self,
        text: &str,
        title: Option<&str>,
        analysis: &AnalysisResult,
        cancel: Arc<AtomicBool>,
    ) -> Result<CombinedSummary> {
        if !self.external_enabled {
            return Err(BriefcastError::SummarizerUnavailable("disabled".to_string()));
        }
        let Some(backend) = &self.external else {
            return Err(BriefcastError::SummarizerUnavailable("no backend configured".to_string()));
        };
        if !backend.is_available().await {
            return Err(BriefcastError::SummarizerUnavailable(format!(
                "{} not reachable",
                backend.name()
            )));
        }

        let language = self.prompt_language(analysis.language);
        let max_length = self.content.max_summary_length;
        let prompt = self
            .prompts
            .summary_prompt(language, title, &analysis.key_phrases, max_length);

        HierarchicalSummarizer::from_settings(backend.clone(), self.prompts.clone(), &self.summarizer)
            .with_max_words((max_length / 5).min(DEFAULT_COMBINE_MAX_WORDS))
            .with_cancel_flag(cancel)
            .summarize_long_text(text, &prompt, language)
            .await
    }

    /// Detected language, or the configured hint when detection is inconclusive.
    fn prompt_language(&self, detected: Language) -> Language {
        match detected {
            Language::Unknown => self
                .content
                .summary_language
                .parse()
                .unwrap_or(Language::Unknown),
            known => known,
        }
    }

    /// Compare an original text with its summary.
    pub fn compare(&self, original: &str, summary: &str) -> ContentComparison {
        crate::summary::compare(original, summary)
    }

    /// Report which summarizers are usable. Probes the backend when enabled.
    pub async fn status(&self) -> SummarizerStatus {
        let external_available = match (&self.external, self.external_enabled) {
            (Some(backend), true) => backend.is_available().await,
            _ => false,
        };

        SummarizerStatus {
            traditional_available: true,
            external_enabled: self.external_enabled,
            external_available,
            backend: BackendStatus {
                name: self.external.as_ref().map(|b| b.name().to_string()),
                base_url: self.summarizer.base_url.clone(),
                model: self.summarizer.model.clone(),
                max_context_tokens: self.summarizer.max_context_tokens,
                max_output_tokens: self.summarizer.max_output_tokens,
                estimated_max_input_chars: self.summarizer.estimated_max_input_chars(),
            },
        }
    }
}

/// Unsuccessful result for a failed external run.
fn failed_summary(err: &BriefcastError) -> SummaryResult {
    match err {
        BriefcastError::AllChunksFailed { chunks } => {
            SummaryResult::failed(SummaryMethod::Hierarchical, *chunks, err.to_string())
        }
        BriefcastError::RecursionLimit { .. } => {
            SummaryResult::failed(SummaryMethod::Hierarchical, 0, err.to_string())
        }
        _ => SummaryResult::failed(SummaryMethod::Direct, 0, err.to_string()),
    }
}
