use crate::llm::provider::{CompletionOptions, CompletionResponse, LLMProvider, Message};
use crate::llm::providers::openai_compat::{build_request, send_chat_request};
use crate::utils::error::GuidelinesError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const OPENAI_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI Chat Completions provider.
///
/// Structured requests set `response_format = json_object`, so the model is
/// held to a JSON answer on the server side as well.
pub struct OpenAIProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String, model: String) -> Result<Self, GuidelinesError> {
        Self::with_base_url(api_key, model, OPENAI_API_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> Result<Self, GuidelinesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| GuidelinesError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_env(model: Option<String>) -> Result<Self, GuidelinesError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| GuidelinesError::missing_api_key("openai"))?;
        Self::new(api_key, model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, GuidelinesError> {
        let request = build_request(&self.model, messages, options);
        send_chat_request(
            &self.client,
            &format!("{}/v1/chat/completions", self.base_url),
            Some(&self.api_key),
            "openai",
            &request,
        )
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
