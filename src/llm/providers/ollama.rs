use crate::llm::provider::{CompletionOptions, CompletionResponse, LLMProvider, Message};
use crate::llm::providers::openai_compat::{build_request, send_chat_request};
use crate::utils::error::GuidelinesError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Local Ollama server, spoken to through its OpenAI-compatible endpoint.
pub struct OllamaProvider {
    host: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    /// `host` may omit the scheme, as `OLLAMA_HOST` often does
    /// (`127.0.0.1:11434`); `http://` is assumed then.
    pub fn new(host: String, model: String) -> Result<Self, GuidelinesError> {
        // Local models can be slow to load on first use
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| GuidelinesError::Config(format!("Failed to create HTTP client: {}", e)))?;
        let host = host.trim().trim_end_matches('/');
        let host = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        Ok(Self {
            host,
            model,
            client,
        })
    }

    /// Build from `OLLAMA_HOST`, falling back to the configured host and then
    /// to `http://localhost:11434`.
    pub fn from_env(
        host: Option<String>,
        model: Option<String>,
    ) -> Result<Self, GuidelinesError> {
        let host = std::env::var("OLLAMA_HOST")
            .ok()
            .or(host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self::new(host, model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, GuidelinesError> {
        let request = build_request(&self.model, messages, options);
        send_chat_request(
            &self.client,
            &format!("{}/v1/chat/completions", self.host),
            None,
            "ollama",
            &request,
        )
        .await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
