use crate::generator::prompts::{build_description_prompt, build_tags_prompt};
use crate::generator::requests::{PromptRequest, RULES_SCHEMA, RulesResponse, TagsRequest};
use crate::llm::client::LLMClient;
use crate::utils::error::GuidelinesError;

/// Generate community rules from a list of tags.
///
/// One backend call, no retries. A reply that is not `{ "rules": string }`
/// fails with a schema validation error.
pub async fn generate_from_tags(
    client: &LLMClient,
    request: &TagsRequest,
) -> Result<RulesResponse, GuidelinesError> {
    tracing::info!(tags = request.tags().len(), "Generating rules from tags");
    let prompt = build_tags_prompt(request);
    invoke(client, &prompt).await
}

/// Generate community rules from a free-text community description.
pub async fn generate_from_prompt(
    client: &LLMClient,
    request: &PromptRequest,
) -> Result<RulesResponse, GuidelinesError> {
    tracing::info!(
        chars = request.prompt().chars().count(),
        "Generating rules from description"
    );
    let prompt = build_description_prompt(request);
    invoke(client, &prompt).await
}

async fn invoke(client: &LLMClient, prompt: &str) -> Result<RulesResponse, GuidelinesError> {
    let value = client.complete_structured(prompt, &RULES_SCHEMA).await?;
    let response: RulesResponse = serde_json::from_value(value)?;
    tracing::debug!(lines = response.rules.lines().count(), "Rules generated");
    Ok(response)
}
