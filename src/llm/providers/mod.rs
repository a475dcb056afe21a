#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(any(feature = "openai", feature = "ollama"))]
pub(crate) mod openai_compat;

use crate::MergedConfig;
use crate::llm::provider::LLMProvider;
use crate::utils::error::GuidelinesError;

/// Build the provider named in `config`.
///
/// Unknown names and providers compiled out of this build are validation
/// errors so they surface before any request is attempted.
pub fn create_provider(config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    match config.provider.as_str() {
        "anthropic" => anthropic_provider(config),
        "openai" => openai_provider(config),
        "ollama" => ollama_provider(config),
        other => Err(GuidelinesError::invalid_provider(other)),
    }
}

#[cfg(feature = "anthropic")]
fn anthropic_provider(config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    let provider = anthropic::AnthropicProvider::from_env(config.model.clone())?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "anthropic"))]
fn anthropic_provider(_config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    Err(GuidelinesError::provider_not_compiled("anthropic"))
}

#[cfg(feature = "openai")]
fn openai_provider(config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    let provider = openai::OpenAIProvider::from_env(config.model.clone())?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "openai"))]
fn openai_provider(_config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    Err(GuidelinesError::provider_not_compiled("openai"))
}

#[cfg(feature = "ollama")]
fn ollama_provider(config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    let provider =
        ollama::OllamaProvider::from_env(config.ollama_host.clone(), config.model.clone())?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "ollama"))]
fn ollama_provider(_config: &MergedConfig) -> Result<Box<dyn LLMProvider>, GuidelinesError> {
    Err(GuidelinesError::provider_not_compiled("ollama"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = MergedConfig {
            provider: "gemini".to_string(),
            ..MergedConfig::default()
        };
        let err = create_provider(&config).err().expect("gemini is not a provider");
        assert!(err.to_string().contains("Invalid provider: 'gemini'"));
    }
}
