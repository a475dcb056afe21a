//! Typed inputs and output of the rule generation service.

use crate::llm::schema::{OutputSchema, SchemaField};
use crate::utils::error::GuidelinesError;
use serde::{Deserialize, Serialize};

/// Minimum prompt length accepted by the editor, in characters.
pub const MIN_PROMPT_LENGTH: usize = 10;

/// Shape the backend must answer with.
pub const RULES_SCHEMA: OutputSchema = OutputSchema {
    name: "GenerateCommunityRulesOutput",
    fields: &[SchemaField {
        name: "rules",
        description: "The generated community rules.",
    }],
};

/// Tags describing a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsRequest {
    tags: Vec<String>,
}

impl TagsRequest {
    /// Build a request from tag labels, trimming surrounding whitespace.
    ///
    /// An empty list, or a blank label, is rejected before any backend call.
    pub fn new<I, S>(tags: I) -> Result<Self, GuidelinesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_string())
            .collect();

        if tags.is_empty() {
            return Err(GuidelinesError::validation(
                "No tags selected",
                "Please select at least one tag to generate rules.",
            ));
        }
        if tags.iter().any(String::is_empty) {
            return Err(GuidelinesError::validation(
                "Tags must not be blank",
                "Remove empty entries from the tag list.",
            ));
        }

        Ok(Self { tags })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Free-text description of a community.
///
/// The service takes the text as-is; [`MIN_PROMPT_LENGTH`] is checked by the
/// editor before a request is ever built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    prompt: String,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Generated rules, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesResponse {
    pub rules: String,
}

/// Length of `prompt` as the editor counts it.
pub fn prompt_length(prompt: &str) -> usize {
    prompt.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_tags_request_trims_and_keeps_order() {
        let request = TagsRequest::new([" Gaming ", "Book Club"]).unwrap();
        assert_eq!(request.tags(), ["Gaming", "Book Club"]);
    }

    #[test]
    fn test_tags_request_rejects_empty() {
        let err = TagsRequest::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("No tags selected"));
    }

    #[test]
    fn test_tags_request_rejects_blank_label() {
        let err = TagsRequest::new(["Gaming", "   "]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_prompt_request_accepts_short_text() {
        let request = PromptRequest::new("tiny");
        assert_eq!(request.prompt(), "tiny");
    }

    #[test]
    fn test_prompt_length_counts_characters() {
        assert_eq!(prompt_length("café club"), 9);
        assert_eq!(prompt_length(""), 0);
    }

    #[test]
    fn test_rules_schema_matches_response_type() {
        let value = RULES_SCHEMA
            .parse(r#"{"rules": "Be kind\nNo spam"}"#)
            .unwrap();
        let response: RulesResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.rules, "Be kind\nNo spam");
    }
}
