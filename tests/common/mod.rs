//! Common test utilities and fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use guidelines::editor::{Clipboard, Editor};
use guidelines::llm::{CompletionOptions, CompletionResponse, LLMClient, LLMProvider, Message};
use guidelines::utils::error::GuidelinesError;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Path to the compiled `guidelines` binary.
pub fn guidelines_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_guidelines"))
}

/// What the fake backend answers with.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

impl Reply {
    pub fn rules(rules: &str) -> Self {
        Self::Text(serde_json::json!({ "rules": rules }).to_string())
    }
}

/// A backend that plays back scripted replies and records what it was sent.
///
/// Replies are used in order; the last one repeats.
#[derive(Clone)]
pub struct FakeProvider {
    replies: Arc<Vec<Reply>>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn script(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "a script needs at least one reply");
        Self {
            replies: Arc::new(replies),
            calls: Arc::default(),
            prompts: Arc::default(),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::script(vec![Reply::Text(text.into())])
    }

    /// Answer with a well-formed `{"rules": ...}` object.
    pub fn with_rules(rules: &str) -> Self {
        Self::script(vec![Reply::rules(rules)])
    }

    pub fn failing() -> Self {
        Self::script(vec![Reply::Fail])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Content of every message sent, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    pub fn client(&self) -> LLMClient {
        LLMClient::new(Box::new(self.clone()))
    }

    pub fn editor(&self) -> Editor {
        Editor::new(self.client())
    }
}

#[async_trait]
impl LLMProvider for FakeProvider {
    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, GuidelinesError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .extend(messages.iter().map(|m| m.content.clone()));

        let reply = &self.replies[call.min(self.replies.len() - 1)];
        match reply {
            Reply::Text(text) => Ok(CompletionResponse::new(text.clone(), 10, 20)),
            Reply::Fail => Err(GuidelinesError::Provider {
                provider: "fake".to_string(),
                message: "backend unavailable".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// In-memory clipboard that records every write.
#[derive(Default)]
pub struct FakeClipboard {
    pub writes: Vec<String>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn broken() -> Self {
        Self {
            writes: Vec::new(),
            fail: true,
        }
    }
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), GuidelinesError> {
        if self.fail {
            return Err(GuidelinesError::Clipboard("no display".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}
