//! Prompt rendering for rule generation.
//!
//! Rendering is pure: a typed request goes in, the prompt text comes out, and
//! no backend is involved.
//!
//! # Example
//!
//! ```
//! use guidelines::generator::prompts::build_tags_prompt;
//! use guidelines::generator::TagsRequest;
//!
//! let request = TagsRequest::new(["Gaming", "Family Friendly"])?;
//! let prompt = build_tags_prompt(&request);
//! assert!(prompt.contains("- Gaming\n- Family Friendly"));
//! # Ok::<(), guidelines::utils::error::GuidelinesError>(())
//! ```

use crate::generator::requests::{PromptRequest, TagsRequest};

/// Load the tags prompt template.
pub fn tags_prompt() -> &'static str {
    include_str!("../../prompts/from_tags.md")
}

/// Load the free-text prompt template.
pub fn description_prompt() -> &'static str {
    include_str!("../../prompts/from_prompt.md")
}

/// Build the prompt for generating rules from tags.
///
/// Each tag becomes a `- tag` bullet inside the template.
pub fn build_tags_prompt(request: &TagsRequest) -> String {
    let tag_list = request
        .tags()
        .iter()
        .map(|tag| format!("- {}", tag))
        .collect::<Vec<_>>()
        .join("\n");

    tags_prompt().replace("{{tags}}", &tag_list)
}

/// Build the prompt for generating rules from a community description.
///
/// The description is embedded verbatim.
pub fn build_description_prompt(request: &PromptRequest) -> String {
    description_prompt().replace("{{prompt}}", request.prompt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tags_prompt_lists_tags_in_order() {
        let request = TagsRequest::new(["Gaming", "Book Club", "Fitness & Wellness"]).unwrap();
        let prompt = build_tags_prompt(&request);

        assert!(prompt.contains("The community is described by the following tags:\n- Gaming\n- Book Club\n- Fitness & Wellness\n"));
        assert!(!prompt.contains("{{tags}}"));
    }

    #[test]
    fn test_build_tags_prompt_covers_required_topics() {
        let request = TagsRequest::new(["Marketplace"]).unwrap();
        let prompt = build_tags_prompt(&request);

        assert!(prompt.contains("Respectful communication and behavior"));
        assert!(prompt.contains("Content guidelines and restrictions"));
        assert!(prompt.contains("Consequences of rule violations"));
        assert!(prompt.contains("Guidelines for moderators"));
    }

    #[test]
    fn test_build_description_prompt_embeds_text_verbatim() {
        let text = "A friendly Minecraft server for families {with braces}";
        let prompt = build_description_prompt(&PromptRequest::new(text));

        assert!(prompt.contains(&format!("following type of community: {}", text)));
        assert!(!prompt.contains("{{prompt}}"));
    }

    #[test]
    fn test_build_description_prompt_forbids_preamble_and_numbering() {
        let prompt = build_description_prompt(&PromptRequest::new("A book club for night owls"));

        assert!(prompt.contains("Behavior expectations"));
        assert!(prompt.contains("Consequences for violations"));
        assert!(prompt.contains("without any introductory or concluding remarks"));
        assert!(prompt.contains("Each rule MUST be on a newline."));
        assert!(prompt.contains("do not number the rules"));
    }

    #[test]
    fn test_description_placeholder_in_user_text_is_not_expanded() {
        let prompt = build_description_prompt(&PromptRequest::new("literally {{tags}} here"));
        assert!(prompt.contains("literally {{tags}} here"));
    }
}
