use crate::llm::provider::{CompletionOptions, CompletionResponse, LLMProvider, Message};
use crate::utils::error::GuidelinesError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: usize = 4096;
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

pub struct AnthropicProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

/// Request body for the Anthropic Messages API.
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// A message in the Anthropic format.
#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: usize,
    output_tokens: usize,
}

/// Error response from the Anthropic API.
#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Result<Self, GuidelinesError> {
        Self::with_base_url(api_key, model, ANTHROPIC_API_URL.to_string())
    }

    /// Point the provider at a different API host (proxies, tests).
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
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| GuidelinesError::missing_api_key("anthropic"))?;
        Self::new(api_key, model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }

    /// Anthropic takes the system prompt as a top-level field rather than a
    /// message, so split it off the front of the conversation.
    fn extract_system_prompt(messages: &[Message]) -> (Option<&str>, &[Message]) {
        match messages.split_first() {
            Some((first, rest)) if first.role == "system" => (Some(&first.content), rest),
            _ => (None, messages),
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, GuidelinesError> {
        let (system, user_messages) = Self::extract_system_prompt(messages);

        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: user_messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: &m.role,
                    content: &m.content,
                })
                .collect(),
            system,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(GuidelinesError::RateLimited {
                provider: "anthropic".to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error) = serde_json::from_str::<AnthropicError>(&error_text) {
                return Err(GuidelinesError::Provider {
                    provider: "anthropic".to_string(),
                    message: format!("{}: {}", error.error.error_type, error.error.message),
                });
            }

            return Err(GuidelinesError::Provider {
                provider: "anthropic".to_string(),
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        let response_body: AnthropicResponse =
            response
                .json()
                .await
                .map_err(|e| GuidelinesError::Provider {
                    provider: "anthropic".to_string(),
                    message: format!("Malformed response body: {}", e),
                })?;

        let content = response_body
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        Ok(CompletionResponse::new(
            content,
            response_body.usage.input_tokens,
            response_body.usage.output_tokens,
        ))
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_system_prompt_with_system() {
        let messages = vec![Message::system("You are helpful"), Message::user("Hello")];

        let (system, remaining) = AnthropicProvider::extract_system_prompt(&messages);
        assert_eq!(system, Some("You are helpful"));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].role, "user");
    }

    #[test]
    fn test_extract_system_prompt_without_system() {
        let messages = vec![Message::user("Hello")];

        let (system, remaining) = AnthropicProvider::extract_system_prompt(&messages);
        assert!(system.is_none());
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn test_extract_system_prompt_empty() {
        let messages: Vec<Message> = vec![];
        let (system, remaining) = AnthropicProvider::extract_system_prompt(&messages);
        assert!(system.is_none());
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_request_omits_absent_system() {
        let request = AnthropicRequest {
            model: DEFAULT_MODEL,
            max_tokens: 1024,
            messages: vec![AnthropicMessage {
                role: "user",
                content: "Hello",
            }],
            system: None,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("temperature"));
        assert!(json.contains("\"max_tokens\":1024"));
    }
}
