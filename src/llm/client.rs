use crate::llm::provider::{CompletionOptions, LLMProvider, Message};
use crate::llm::schema::OutputSchema;
use crate::utils::error::GuidelinesError;
use serde_json::Value;

/// Thin wrapper around a boxed [`LLMProvider`].
///
/// Every call is a single attempt. Failures surface to the caller untouched so
/// the user decides whether to resubmit.
pub struct LLMClient {
    provider: Box<dyn LLMProvider>,
    options: CompletionOptions,
}

impl LLMClient {
    pub fn new(provider: Box<dyn LLMProvider>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default(),
        }
    }

    /// Create a client that applies `options` to every request.
    pub fn with_options(provider: Box<dyn LLMProvider>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    /// Send `prompt` and return the JSON object the backend answered with,
    /// checked against `schema`.
    pub async fn complete_structured(
        &self,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<Value, GuidelinesError> {
        let messages = [Message::user(format!(
            "{}\n\n{}",
            prompt.trim_end(),
            schema.instructions()
        ))];
        let options = CompletionOptions {
            json_output: true,
            ..self.options.clone()
        };

        tracing::debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            schema = schema.name,
            "Sending structured completion request"
        );

        let response = self.provider.complete(&messages, &options).await?;

        tracing::debug!(
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            total_tokens = response.total_tokens(),
            "Completion received"
        );
        tracing::trace!("Raw completion: {}", response.content);

        schema.parse(&response.content)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }
}
