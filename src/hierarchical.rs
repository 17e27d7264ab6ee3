//! Multi-pass summarization for texts larger than the summarizer's context.
//!
//! Texts that fit are summarized in one call. Longer texts are chunked, each
//! chunk is summarized on its own, and the partial summaries are merged with a
//! combine prompt. When the merged partials are still too large they are
//! chunked again, up to a fixed depth.

use crate::analysis::{char_len, Language};
use crate::chunking::{TextChunk, TokenBudget};
use crate::config::{Prompts, SummarizerSettings};
use crate::error::{BriefcastError, Result};
use crate::llm::ExternalSummarizer;
use crate::summary::SummaryMethod;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Word limit announced in the combine prompt.
pub const DEFAULT_COMBINE_MAX_WORDS: usize = 200;

/// Fixed-delay retry policy for summarizer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first.
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl From<&SummarizerSettings> for RetryPolicy {
    fn from(settings: &SummarizerSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1) as usize,
            delay: Duration::from_millis(settings.retry_delay_ms),
        }
    }
}

/// Result of a successful multi-pass run.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSummary {
    pub summary: String,
    /// [`SummaryMethod::Direct`] or [`SummaryMethod::Hierarchical`].
    pub method: SummaryMethod,
    /// Chunks in the first pass (1 for direct).
    pub chunks_processed: usize,
}

/// Drives an [`ExternalSummarizer`] over arbitrarily long text.
pub struct HierarchicalSummarizer {
    backend: Arc<dyn ExternalSummarizer>,
    prompts: Prompts,
    budget: TokenBudget,
    retry: RetryPolicy,
    max_depth: usize,
    max_words: usize,
    cancelled: Arc<AtomicBool>,
}

impl HierarchicalSummarizer {
    pub fn new(backend: Arc<dyn ExternalSummarizer>, prompts: Prompts, budget: TokenBudget) -> Self {
        Self {
            backend,
            prompts,
            budget,
            retry: RetryPolicy::default(),
            max_depth: 3,
            max_words: DEFAULT_COMBINE_MAX_WORDS,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build from summarizer settings (budget, retries and depth).
    pub fn from_settings(
        backend: Arc<dyn ExternalSummarizer>,
        prompts: Prompts,
        settings: &SummarizerSettings,
    ) -> Self {
        Self::new(backend, prompts, TokenBudget::from(settings))
            .with_retry(RetryPolicy::from(settings))
            .with_max_depth(settings.max_depth)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Cap on combine passes. Values below 1 are treated as 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Share a cancellation flag with the caller.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Flag that stops the run at the next chunk or attempt boundary when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn budget(&self) -> &TokenBudget {
        &self.budget
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancelled.load(Ordering::SeqCst) {
            Err(BriefcastError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Summarize `text` with `prompt`, chunking and recombining when it does not fit.
    ///
    /// Blank text is rejected with [`BriefcastError::EmptyInput`] before any call.
    #[instrument(skip_all, fields(text_chars = char_len(text), language = %language))]
    pub async fn summarize_long_text(
        &self,
        text: &str,
        prompt: &str,
        language: Language,
    ) -> Result<CombinedSummary> {
        self.check_cancelled()?;
        if text.trim().is_empty() {
            return Err(BriefcastError::EmptyInput);
        }

        if self.budget.fits_in_budget(text, prompt) {
            info!("Text fits in context window, summarizing directly");
            let summary = self.summarize_chunk(text, prompt, false, language).await?;
            return Ok(CombinedSummary {
                summary,
                method: SummaryMethod::Direct,
                chunks_processed: 1,
            });
        }

        let chunks = self.budget.split_into_chunks(text, prompt)?;
        info!("Text exceeds context window, split into {} chunks", chunks.len());
        let chunks_processed = chunks.len();

        let mut partials = self.summarize_chunks(&chunks, prompt, language).await?;
        let combine_prompt = self.prompts.combine_prompt(language, self.max_words);

        let mut depth = 1;
        loop {
            let combined = partials.join("\n\n");
            if self.budget.fits_in_budget(&combined, &combine_prompt) {
                debug!("Combining {} partial summaries (pass {})", partials.len(), depth);
                let summary = self
                    .summarize_chunk(&combined, &combine_prompt, false, language)
                    .await?;
                return Ok(CombinedSummary {
                    summary,
                    method: SummaryMethod::Hierarchical,
                    chunks_processed,
                });
            }

            if depth >= self.max_depth {
                error!("Combined summaries still too long after {} passes", depth);
                return Err(BriefcastError::RecursionLimit { depth });
            }

            info!("Combined summaries still too long, splitting again");
            let chunks = self.budget.split_into_chunks(&combined, &combine_prompt)?;
            partials = self.summarize_chunks(&chunks, &combine_prompt, language).await?;
            depth += 1;
        }
    }

    /// Summarize chunks left to right, keeping only the successes.
    async fn summarize_chunks(
        &self,
        chunks: &[TextChunk],
        prompt: &str,
        language: Language,
    ) -> Result<Vec<String>> {
        let mut summaries = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            self.check_cancelled()?;
            debug!("Processing chunk {}/{}", chunk.index + 1, chunks.len());

            match self
                .summarize_chunk(&chunk.text, prompt, chunk.is_partial, language)
                .await
            {
                Ok(summary) => summaries.push(summary),
                Err(BriefcastError::Cancelled) => return Err(BriefcastError::Cancelled),
                Err(e) => warn!("Failed to summarize chunk {}: {}", chunk.index + 1, e),
            }
        }

        if summaries.is_empty() {
            error!("No chunks summarized out of {}", chunks.len());
            return Err(BriefcastError::AllChunksFailed {
                chunks: chunks.len(),
            });
        }

        Ok(summaries)
    }

    /// One summarizer call with retries. Partial chunks get the fragment note.
    pub async fn summarize_chunk(
        &self,
        text: &str,
        prompt: &str,
        is_partial: bool,
        language: Language,
    ) -> Result<String> {
        let input = if is_partial {
            format!("{}\n\n{}\n\n{}", prompt, self.prompts.partial_note(language), text)
        } else {
            format!("{}\n\n{}", prompt, text)
        };

        let mut attempt = 0;
        loop {
            self.check_cancelled()?;
            attempt += 1;

            match self.backend.summarize_one(&input).await {
                Ok(summary) => return Ok(summary),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    warn!("Attempt {} failed: {}. Retrying...", attempt, e);
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => {
                    if matches!(e, BriefcastError::ContextBudgetExceeded(_)) {
                        error!("Context window exceeded even for chunk");
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted responses, then repeats the fallback.
    struct ScriptedSummarizer {
        script: Mutex<VecDeque<Result<String>>>,
        fallback: String,
        inputs: Mutex<Vec<String>>,
        cancel_after_first: Option<Arc<AtomicBool>>,
    }

    impl ScriptedSummarizer {
        fn replying(fallback: &str) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback: fallback.to_string(),
                inputs: Mutex::new(Vec::new()),
                cancel_after_first: None,
            }
        }

        fn with_script(self, script: Vec<Result<String>>) -> Self {
            *self.script.lock().unwrap() = script.into();
            self
        }

        fn calls(&self) -> usize {
            self.inputs.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ExternalSummarizer for ScriptedSummarizer {
        async fn summarize_one(&self, input: &str) -> Result<String> {
            self.inputs.lock().unwrap().push(input.to_string());
            if let Some(flag) = &self.cancel_after_first {
                flag.store(true, Ordering::SeqCst);
            }
            match self.script.lock().unwrap().pop_front() {
                Some(reply) => reply,
                None => Ok(self.fallback.clone()),
            }
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn small_budget() -> TokenBudget {
        TokenBudget {
            max_context_tokens: 400,
            max_output_tokens: 0,
            overlap_tokens: 0,
            chars_per_token: 1.0,
        }
    }

    fn no_delay() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }

    fn combiner(backend: Arc<ScriptedSummarizer>) -> HierarchicalSummarizer {
        HierarchicalSummarizer::new(backend, Prompts::default(), small_budget()).with_retry(no_delay())
    }

    fn long_text() -> String {
        "The committee reviewed the budget in detail. ".repeat(27)
    }

    #[tokio::test]
    async fn test_direct_when_text_fits() {
        let backend = Arc::new(ScriptedSummarizer::replying("Short summary."));
        let result = combiner(backend.clone())
            .summarize_long_text("A short note.", "Summarize:", Language::En)
            .await
            .unwrap();

        assert_eq!(result.method, SummaryMethod::Direct);
        assert_eq!(result.chunks_processed, 1);
        assert_eq!(result.summary, "Short summary.");
        assert_eq!(backend.calls(), 1);
        assert_eq!(backend.inputs.lock().unwrap()[0], "Summarize:\n\nA short note.");
    }

    #[tokio::test]
    async fn test_one_combination_pass_for_long_text() {
        let text = long_text();
        let budget = small_budget();
        assert!(text.chars().count() >= 3 * budget.input_tokens());
        let expected_chunks = budget.split_into_chunks(&text, "Summarize:").unwrap().len();
        assert!(expected_chunks > 1);

        let backend = Arc::new(ScriptedSummarizer::replying("ok."));
        let result = combiner(backend.clone())
            .summarize_long_text(&text, "Summarize:", Language::En)
            .await
            .unwrap();

        assert_eq!(result.method, SummaryMethod::Hierarchical);
        assert_eq!(result.chunks_processed, expected_chunks);
        assert_eq!(backend.calls(), expected_chunks + 1);

        let inputs = backend.inputs.lock().unwrap();
        assert!(inputs[0].contains("NOTE: This is a fragment"));
        let last = inputs.last().unwrap();
        assert!(last.starts_with("Combine the following partial summaries"));
        assert!(!last.contains("NOTE: This is a fragment"));
    }

    #[tokio::test]
    async fn test_second_pass_when_partials_too_long() {
        let text = long_text();
        let budget = small_budget();
        let first_chunks = budget.split_into_chunks(&text, "Summarize:").unwrap().len();

        // First-pass partials are long, so their concatenation overflows the context.
        let partial = "w".repeat(200);
        let script = (0..first_chunks).map(|_| Ok(partial.clone())).collect();
        let backend = Arc::new(ScriptedSummarizer::replying("ok.").with_script(script));

        let combined = vec![partial; first_chunks].join("\n\n");
        let combine_prompt = Prompts::default().combine_prompt(Language::En, DEFAULT_COMBINE_MAX_WORDS);
        assert!(!budget.fits_in_budget(&combined, &combine_prompt));
        let second_chunks = budget.split_into_chunks(&combined, &combine_prompt).unwrap().len();
        assert!(second_chunks > 1);

        let result = combiner(backend.clone())
            .summarize_long_text(&text, "Summarize:", Language::En)
            .await
            .unwrap();

        assert_eq!(result.method, SummaryMethod::Hierarchical);
        assert_eq!(result.chunks_processed, first_chunks);
        assert_eq!(result.summary, "ok.");
        assert_eq!(backend.calls(), first_chunks + second_chunks + 1);
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let backend = Arc::new(ScriptedSummarizer::replying("ok."));
        let err = combiner(backend.clone())
            .summarize_long_text("  \n\t ", "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::EmptyInput));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let backend = Arc::new(ScriptedSummarizer::replying("Recovered.").with_script(vec![
            Err(BriefcastError::Summarizer("timeout".into())),
            Err(BriefcastError::Summarizer("timeout".into())),
        ]));
        let result = combiner(backend.clone())
            .summarize_long_text("A short note.", "Summarize:", Language::En)
            .await
            .unwrap();

        assert_eq!(result.summary, "Recovered.");
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let backend = Arc::new(ScriptedSummarizer::replying("never").with_script(vec![
            Err(BriefcastError::Summarizer("down".into())),
            Err(BriefcastError::Summarizer("down".into())),
            Err(BriefcastError::Summarizer("down".into())),
        ]));
        let err = combiner(backend.clone())
            .summarize_long_text("A short note.", "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::Summarizer(_)));
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_context_overflow_not_retried() {
        let backend = Arc::new(ScriptedSummarizer::replying("ok.").with_script(vec![Err(
            BriefcastError::ContextBudgetExceeded("exceededContextWindowSize".into()),
        )]));
        let text = long_text();
        let chunks = small_budget().split_into_chunks(&text, "Summarize:").unwrap().len();

        let result = combiner(backend.clone())
            .summarize_long_text(&text, "Summarize:", Language::En)
            .await
            .unwrap();

        // The first chunk is dropped, the rest are summarized and combined.
        assert_eq!(result.method, SummaryMethod::Hierarchical);
        assert_eq!(backend.calls(), chunks + 1);
    }

    #[tokio::test]
    async fn test_all_chunks_failed() {
        let text = long_text();
        let chunks = small_budget().split_into_chunks(&text, "Summarize:").unwrap().len();
        let script = (0..chunks)
            .map(|_| Err(BriefcastError::ContextBudgetExceeded("too big".into())))
            .collect();
        let backend = Arc::new(ScriptedSummarizer::replying("ok.").with_script(script));

        let err = combiner(backend)
            .summarize_long_text(&text, "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::AllChunksFailed { chunks: n } if n == chunks));
    }

    #[tokio::test]
    async fn test_recursion_limit() {
        // Partials never shrink, so the combined text never fits.
        let backend = Arc::new(ScriptedSummarizer::replying(&"w".repeat(300)));
        let err = combiner(backend)
            .with_max_depth(2)
            .summarize_long_text(&long_text(), "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::RecursionLimit { depth: 2 }));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let backend = Arc::new(ScriptedSummarizer::replying("ok."));
        let summarizer = combiner(backend.clone());
        summarizer.cancel_flag().store(true, Ordering::SeqCst);

        let err = summarizer
            .summarize_long_text(&long_text(), "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::Cancelled));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_between_chunks() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut backend = ScriptedSummarizer::replying("ok.");
        backend.cancel_after_first = Some(flag.clone());
        let backend = Arc::new(backend);

        let err = combiner(backend.clone())
            .with_cancel_flag(flag)
            .summarize_long_text(&long_text(), "Summarize:", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, BriefcastError::Cancelled));
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let settings = SummarizerSettings {
            max_retries: 0,
            retry_delay_ms: 250,
            ..SummarizerSettings::default()
        };
        let policy = RetryPolicy::from(&settings);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay, Duration::from_millis(250));
    }
}
