use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Compiled regex patterns for redacting sensitive data.
///
/// The patterns are literals validated by the tests below, so the `expect`
/// calls can only fire on a programming error.
static REDACTION_PATTERNS: LazyLock<[(regex::Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (
            regex::Regex::new(r"(api[_-]?key[=:\s]+)[^\s]+")
                .expect("api_key redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(token[=:\s]+)[^\s]+").expect("token redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(?i)(bearer\s+)[^\s]+")
                .expect("bearer redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(sk-[a-zA-Z0-9_-]{8,})")
                .expect("sk-key redaction pattern is invalid"),
            "[REDACTED]",
        ),
    ]
});

#[derive(Debug, Error)]
pub enum GuidelinesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("LLM provider error: {provider} - {}", redact_sensitive_data(message))]
    Provider { provider: String, message: String },

    #[error("Rate limited by {provider}, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Output error: {0}")]
    OutputFormat(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Response did not match the expected schema: {message}")]
    SchemaValidation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },

    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Coarse classification of a [`GuidelinesError`].
///
/// Callers that only need to know *where* a generation failed match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed shape or length constraints; the backend was not called.
    Validation,
    /// The backend could not be reached or reported a failure.
    BackendInvocation,
    /// The backend answered, but not with the declared output shape.
    SchemaValidation,
    /// Configuration, file system, or clipboard failures.
    Other,
}

/// Redact sensitive information from error messages.
fn redact_sensitive_data(message: &str) -> String {
    let mut result = message.to_string();
    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}

impl GuidelinesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError { .. } => ErrorKind::Validation,
            Self::Provider { .. } | Self::RateLimited { .. } | Self::NetworkError { .. } => {
                ErrorKind::BackendInvocation
            }
            Self::SchemaValidation { .. } => ErrorKind::SchemaValidation,
            Self::Config(_) | Self::FileSystem(_) | Self::OutputFormat(_) | Self::Clipboard(_) => {
                ErrorKind::Other
            }
        }
    }

    pub fn validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_provider(provider: &str) -> Self {
        Self::validation(
            format!("Invalid provider: '{}'", provider),
            "Valid providers are: anthropic, openai, ollama",
        )
    }

    pub fn provider_not_compiled(provider: &str) -> Self {
        Self::validation(
            format!("Provider '{}' is not enabled in this build", provider),
            format!("Rebuild with `--features {}`", provider),
        )
    }

    pub fn missing_api_key(provider: &str) -> Self {
        let env_var = format!("{}_API_KEY", provider.to_uppercase());
        Self::validation(
            format!("API key not configured for provider '{}'", provider),
            format!(
                "Set the {} environment variable before running guidelines",
                env_var
            ),
        )
    }
}

impl From<serde_json::Error> for GuidelinesError {
    fn from(err: serde_json::Error) -> Self {
        Self::SchemaValidation {
            message: "Failed to parse JSON response".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for GuidelinesError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out. Check your network connection.".to_string()
        } else if err.is_connect() {
            "Failed to connect to server. Check your network connection.".to_string()
        } else if err.is_status() {
            format!(
                "HTTP error: {}",
                err.status()
                    .map_or("unknown".to_string(), |s| s.to_string())
            )
        } else {
            "Network request failed".to_string()
        };

        Self::NetworkError {
            message,
            source: Some(Box::new(err)),
        }
    }
}

/// Render an error for the terminal.
///
/// Validation errors are split into message and suggestion; everything else
/// gets its source chain listed when `verbose` is set.
pub fn format_error(error: &GuidelinesError, verbose: bool) -> String {
    let mut out = String::new();
    match error {
        GuidelinesError::ValidationError {
            message,
            suggestion,
        } => {
            out.push_str(&format!("\n\u{26a0} {}\n", message));
            out.push_str(&format!("  \u{2192} {}", suggestion));
        }
        other => {
            out.push_str(&format!("\n\u{26a0} Error: {}", other));
            if verbose {
                let mut source = std::error::Error::source(other);
                while let Some(cause) = source {
                    out.push_str(&format!("\n\u{2514}\u{2500} {}", cause));
                    source = cause.source();
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_data_redaction() {
        let message = "Error with api_key=sk-1234567890abcdefghij and token=secret123";
        let redacted = redact_sensitive_data(message);
        assert!(!redacted.contains("sk-1234567890abcdefghij"));
        assert!(!redacted.contains("secret123"));
        assert!(redacted.contains("[REDACTED]"));
    }

    #[test]
    fn test_bearer_redaction_variants() {
        assert!(!redact_sensitive_data("Bearer abc123token").contains("abc123token"));
        assert!(!redact_sensitive_data("BEARER xyz789secret").contains("xyz789secret"));

        let msg = "Authorization: Bearer token123 and more text";
        let redacted = redact_sensitive_data(msg);
        assert!(!redacted.contains("token123"));
        assert!(redacted.contains("more text"));
    }

    #[test]
    fn test_provider_error_redacts_api_key() {
        let err = GuidelinesError::Provider {
            provider: "openai".to_string(),
            message: "Incorrect key sk-test123456789012345678901234".to_string(),
        };
        let msg = err.to_string();
        assert!(!msg.contains("sk-test123456789012345678901234"));
        assert!(msg.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_api_key_shows_env_var() {
        let err = GuidelinesError::missing_api_key("anthropic");
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_error_kinds() {
        let backend = GuidelinesError::Provider {
            provider: "anthropic".to_string(),
            message: "overloaded".to_string(),
        };
        assert_eq!(backend.kind(), ErrorKind::BackendInvocation);

        let limited = GuidelinesError::RateLimited {
            provider: "openai".to_string(),
            retry_after: None,
        };
        assert_eq!(limited.kind(), ErrorKind::BackendInvocation);

        assert_eq!(
            GuidelinesError::schema("missing field `rules`").kind(),
            ErrorKind::SchemaValidation
        );
        assert_eq!(
            GuidelinesError::Clipboard("no display".to_string()).kind(),
            ErrorKind::Other
        );
    }

    #[test]
    fn test_json_error_is_schema_validation() {
        let err: GuidelinesError = serde_json::from_str::<serde_json::Value>("{not json")
            .map_err(GuidelinesError::from)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaValidation);
    }

    #[test]
    fn test_format_validation_error_shows_suggestion() {
        let err = GuidelinesError::invalid_provider("gemini");
        let rendered = format_error(&err, false);
        assert!(rendered.contains("Invalid provider: 'gemini'"));
        assert!(rendered.contains("anthropic, openai, ollama"));
    }
}
