pub mod client;
pub mod provider;
pub mod providers;
pub mod schema;

pub use client::LLMClient;
pub use provider::{CompletionOptions, CompletionResponse, LLMProvider, Message};
pub use schema::{OutputSchema, SchemaField};
