//! Community rule generation.
//!
//! This module provides:
//! - Typed, validated request and response shapes
//! - Prompt rendering for the tags and description variants
//! - The two generation calls against a text-completion backend

pub mod prompts;
pub mod requests;
pub mod rules;

pub use prompts::{build_description_prompt, build_tags_prompt};
pub use requests::{MIN_PROMPT_LENGTH, PromptRequest, RULES_SCHEMA, RulesResponse, TagsRequest};
pub use rules::{generate_from_prompt, generate_from_tags};
