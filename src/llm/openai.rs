//! OpenAI-compatible chat completion backend.

use super::{is_context_overflow, ExternalSummarizer};
use crate::analysis::char_len;
use crate::config::SummarizerSettings;
use crate::error::{BriefcastError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Summarizer backed by an OpenAI-compatible server (e.g. an on-device model proxy).
pub struct OpenAiSummarizer {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
    available: OnceCell<bool>,
}

impl OpenAiSummarizer {
    /// Create a summarizer from settings. No request is made until first use.
    pub fn new(settings: &SummarizerSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens as u32,
            available: OnceCell::new(),
        })
    }

    /// Server URL this summarizer talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[allow(deprecated)]
    async fn complete(&self, input: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(input)
                .build()
                .map_err(|e| BriefcastError::Summarizer(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(max_tokens)
            .temperature(temperature)
            .build()
            .map_err(|e| BriefcastError::Summarizer(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| BriefcastError::Summarizer("Empty response from summarizer".to_string()))?;

        Ok(content)
    }
}

fn classify_error(err: OpenAIError) -> BriefcastError {
    let message = err.to_string();
    if is_context_overflow(&message) {
        BriefcastError::ContextBudgetExceeded(message)
    } else {
        BriefcastError::Summarizer(message)
    }
}

#[async_trait]
impl ExternalSummarizer for OpenAiSummarizer {
    #[instrument(skip_all, fields(model = %self.model, input_chars = char_len(input)))]
    async fn summarize_one(&self, input: &str) -> Result<String> {
        let summary = self
            .complete(input, self.max_output_tokens, self.temperature)
            .await?;
        debug!("Summarizer returned {} chars", char_len(&summary));
        Ok(summary)
    }

    async fn is_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| async {
                match self.complete("Hello", 10, 0.1).await {
                    Ok(_) => {
                        info!("External summarizer reachable at {}", self.base_url);
                        true
                    }
                    Err(e) => {
                        warn!("External summarizer at {} not available: {}", self.base_url, e);
                        false
                    }
                }
            })
            .await
    }

    fn name(&self) -> &str {
        &self.model
    }
}
