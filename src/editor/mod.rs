//! The guidelines editor.
//!
//! Holds the session's only mutable state: the tag selection, the draft, and
//! whether a generation is in flight. Front ends call into an [`Editor`] and
//! show the [`Notice`] each operation returns.
//!
//! ```text
//! Idle/Ready --submit--> Loading --ok--> Ready
//!                                --err-> Idle
//! ```

pub mod clipboard;
pub mod notice;
pub mod tags;

pub use clipboard::{Clipboard, SystemClipboard};
pub use notice::{Notice, NoticeLevel};
pub use tags::{PREDEFINED_TAGS, TagSelection, default_tags};

use crate::generator::{
    MIN_PROMPT_LENGTH, PromptRequest, RulesResponse, TagsRequest, generate_from_prompt,
    generate_from_tags,
};
use crate::llm::client::LLMClient;
use crate::output::{
    MARKDOWN_FILENAME, MARKDOWN_MIME, WriteOptions, render_markdown, write_document,
};
use crate::utils::error::GuidelinesError;
use notice::titles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No draft and nothing in flight.
    Idle,
    /// A generation request is in flight; the draft is empty.
    Loading,
    /// A draft is shown and can be edited or exported.
    Ready,
}

pub struct Editor {
    client: LLMClient,
    state: EditorState,
    draft: String,
    selection: TagSelection,
}

impl Editor {
    pub fn new(client: LLMClient) -> Self {
        Self {
            client,
            state: EditorState::Idle,
            draft: String::new(),
            selection: TagSelection::new(),
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    pub fn client(&self) -> &LLMClient {
        &self.client
    }

    /// Toggle a tag in the selection. Never changes the editor state.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.selection.toggle(tag)
    }

    /// Generate rules from the selected tags.
    pub async fn submit_tags(&mut self) -> Notice {
        if self.selection.is_empty() {
            return Notice::destructive(
                titles::NO_TAGS_SELECTED,
                "Please select at least one tag to generate rules.",
            );
        }
        let request = match TagsRequest::new(self.selection.tags()) {
            Ok(request) => request,
            Err(err) => return validation_notice(titles::NO_TAGS_SELECTED, &err),
        };

        self.begin_loading();
        let result = generate_from_tags(&self.client, &request).await;
        self.finish_loading(result, "tags")
    }

    /// Generate rules from a free-text community description.
    pub async fn submit_prompt(&mut self, prompt: &str) -> Notice {
        if crate::generator::requests::prompt_length(prompt) < MIN_PROMPT_LENGTH {
            return Notice::destructive(
                titles::PROMPT_TOO_SHORT,
                format!("Prompt must be at least {} characters.", MIN_PROMPT_LENGTH),
            );
        }
        let request = PromptRequest::new(prompt);

        self.begin_loading();
        let result = generate_from_prompt(&self.client, &request).await;
        self.finish_loading(result, "prompt")
    }

    /// Replace the draft with user-edited text.
    ///
    /// Only a `Ready` editor has a draft to edit; otherwise the draft is left
    /// alone and a notice is returned.
    pub fn edit_draft(&mut self, text: impl Into<String>) -> Option<Notice> {
        if let Some(notice) = self.check_editable() {
            return Some(notice);
        }
        self.draft = text.into();
        None
    }

    /// `None` when there is a draft to edit, the reason otherwise.
    pub fn check_editable(&self) -> Option<Notice> {
        (self.state != EditorState::Ready).then(|| {
            Notice::destructive(titles::NOTHING_TO_EDIT, "Generate some rules first!")
        })
    }

    /// Copy the current draft, verbatim, to `clipboard`.
    pub fn copy_to_clipboard(&self, clipboard: &mut dyn Clipboard) -> Notice {
        if self.draft.is_empty() {
            return Notice::destructive(titles::NOTHING_TO_COPY, "Generate some rules first!");
        }

        match clipboard.set_text(&self.draft) {
            Ok(()) => Notice::success(titles::RULES_COPIED, "Guidelines copied to your clipboard."),
            Err(err) => {
                tracing::error!("Error copying rules to clipboard: {}", err);
                Notice::destructive(titles::COPY_FAILED, "Could not access the clipboard.")
            }
        }
    }

    /// Export the current draft as `community-guidelines.md`.
    pub fn download_markdown(&self, options: &WriteOptions) -> Notice {
        if self.draft.is_empty() {
            return Notice::destructive(titles::NOTHING_TO_DOWNLOAD, "Generate some rules first!");
        }

        let document = render_markdown(&self.draft);
        tracing::debug!(mime = MARKDOWN_MIME, bytes = document.len(), "Exporting rules");
        match write_document(&document, MARKDOWN_FILENAME, options) {
            Ok(result) => {
                let mut description =
                    format!("Your community guidelines are ready: {}", result.path.display());
                if let Some(backup) = &result.backup_path {
                    description.push_str(&format!(
                        " (previous version kept at {})",
                        backup.display()
                    ));
                } else if result.overwritten {
                    description.push_str(" (replaced the previous file)");
                }
                Notice::success(titles::MARKDOWN_DOWNLOADED, description)
            }
            Err(err) => {
                tracing::error!("Error writing markdown: {}", err);
                Notice::destructive(titles::DOWNLOAD_FAILED, err.to_string())
            }
        }
    }

    fn begin_loading(&mut self) {
        self.state = EditorState::Loading;
        self.draft.clear();
    }

    fn finish_loading(
        &mut self,
        result: Result<RulesResponse, GuidelinesError>,
        source: &str,
    ) -> Notice {
        match result {
            Ok(response) => {
                self.draft = response.rules;
                self.state = EditorState::Ready;
                Notice::success(
                    titles::RULES_GENERATED,
                    "Review and customize your new community guidelines.",
                )
            }
            Err(err) => {
                tracing::error!(kind = ?err.kind(), "Error generating rules from {}: {}", source, err);
                self.draft.clear();
                self.state = EditorState::Idle;
                Notice::destructive(
                    titles::GENERATION_FAILED,
                    "Could not generate rules. Please try again.",
                )
            }
        }
    }
}

fn validation_notice(title: &str, err: &GuidelinesError) -> Notice {
    match err {
        GuidelinesError::ValidationError { suggestion, .. } => {
            Notice::destructive(title, suggestion.clone())
        }
        other => Notice::destructive(title, other.to_string()),
    }
}
