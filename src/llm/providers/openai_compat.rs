//! Request/response plumbing for OpenAI-compatible chat completion endpoints.
//!
//! Shared by the OpenAI provider and by Ollama, which serves the same API
//! under `/v1/chat/completions`.

use crate::llm::provider::{CompletionOptions, CompletionResponse, Message};
use crate::utils::error::GuidelinesError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatError {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: Option<String>,
    code: Option<String>,
}

pub(crate) fn build_request<'a>(
    model: &'a str,
    messages: &'a [Message],
    options: &CompletionOptions,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: messages
            .iter()
            .map(|m| ChatMessage {
                role: &m.role,
                content: &m.content,
            })
            .collect(),
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        response_format: options.json_output.then_some(ResponseFormat {
            format_type: "json_object",
        }),
    }
}

/// POST a chat completion request and map the answer onto
/// [`CompletionResponse`].
pub(crate) async fn send_chat_request(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    provider: &str,
    request: &ChatRequest<'_>,
) -> Result<CompletionResponse, GuidelinesError> {
    let mut builder = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(request);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let response = builder.send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        return Err(GuidelinesError::RateLimited {
            provider: provider.to_string(),
            retry_after,
        });
    }

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();

        if let Ok(ChatError {
            error: Some(detail),
        }) = serde_json::from_str::<ChatError>(&error_text)
        {
            let error_type = detail
                .error_type
                .or(detail.code)
                .unwrap_or_else(|| "unknown".to_string());
            let message = detail
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(GuidelinesError::Provider {
                provider: provider.to_string(),
                message: format!("{}: {}", error_type, message),
            });
        }

        return Err(GuidelinesError::Provider {
            provider: provider.to_string(),
            message: format!("HTTP {}: {}", status, error_text),
        });
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| GuidelinesError::Provider {
            provider: provider.to_string(),
            message: format!("Malformed response body: {}", e),
        })?;

    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    let (prompt_tokens, completion_tokens) = body
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    Ok(CompletionResponse::new(
        content,
        prompt_tokens,
        completion_tokens,
    ))
}
