//! OpenAI-compatible client configuration for local summarization servers.

use crate::config::SummarizerSettings;
use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client pointed at the configured server with its request timeout.
pub fn create_client(settings: &SummarizerSettings) -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(settings, Duration::from_secs(settings.timeout_secs))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    settings: &SummarizerSettings,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.base_url.trim_end_matches('/'))
        .with_api_key(&settings.api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
