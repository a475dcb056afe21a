//! # guidelines
//!
//! Drafts community guidelines with an LLM. A user either picks a few tags
//! that describe their community or writes a short description; the matching
//! prompt template is rendered and sent to a text-completion backend, and the
//! returned rules become an editable draft that can be copied to the
//! clipboard or exported as `community-guidelines.md`.
//!
//! ## Layout
//!
//! - [`generator`] - request types, prompt rendering, and the two generation calls
//! - [`llm`] - the backend seam, structured-output parsing, and providers
//! - [`editor`] - the UI-independent editor state machine and its notices
//! - [`output`] - Markdown rendering and file export
//! - [`cli`] - argument parsing, layered configuration, and the interactive session
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/guidelines/config.toml)
//! 2. Git root (guidelines.toml)
//! 3. Current directory (guidelines.toml)
//! 4. Explicit --config path
//! 5. Environment variables (GUIDELINES_*)
//! 6. CLI flags (highest precedence)

pub mod cli;
pub mod editor;
pub mod generator;
pub mod llm;
pub mod output;
pub mod utils;

use anyhow::{Context, Result};
use editor::{Editor, SystemClipboard};
use generator::requests::prompt_length;
use generator::{
    MIN_PROMPT_LENGTH, PromptRequest, TagsRequest, build_description_prompt, build_tags_prompt,
};
use llm::{CompletionOptions, LLMClient};
use output::WriteOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// LLM provider (e.g., "anthropic", "openai", "ollama")
    pub provider: String,
    /// Model name (optional, provider may have default)
    pub model: Option<String>,
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
    /// Ollama server URL from the config file
    pub ollama_host: Option<String>,
    /// Directory the Markdown export is written to
    pub output_dir: PathBuf,
    /// Overwrite an existing export instead of picking a numbered name
    pub force: bool,
    /// Tags given on the command line (one-shot mode)
    pub tags: Vec<String>,
    /// Community description given on the command line (one-shot mode)
    pub prompt: Option<String>,
    /// Tag catalogue offered by the interactive editor
    pub predefined_tags: Vec<String>,
    pub copy: bool,
    pub download: bool,
    /// Render the prompt without calling the LLM
    pub dry_run: bool,
    /// Verbosity level (0-3)
    pub verbose: u8,
    pub quiet: bool,
}

impl Default for MergedConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: None,
            max_tokens: None,
            temperature: None,
            ollama_host: None,
            output_dir: PathBuf::from("."),
            force: false,
            tags: Vec::new(),
            prompt: None,
            predefined_tags: editor::default_tags(),
            copy: false,
            download: false,
            dry_run: false,
            verbose: 0,
            quiet: false,
        }
    }
}

impl MergedConfig {
    /// Whether a tags list or description was given up front.
    pub fn is_one_shot(&self) -> bool {
        !self.tags.is_empty() || self.prompt.is_some()
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let directive = if quiet {
        "error".to_string()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("warn,guidelines={}", level)
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub async fn run(config: MergedConfig) -> Result<()> {
    tracing::info!("guidelines v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: provider={}, model={:?}, output={}, tags={:?}, prompt={}",
        config.provider,
        config.model,
        config.output_dir.display(),
        config.tags,
        config.prompt.is_some()
    );

    if config.dry_run {
        return dry_run(&config);
    }

    let client = build_client(&config)?;
    let mut editor = Editor::new(client);

    if config.is_one_shot() {
        run_once(&mut editor, &config).await
    } else {
        cli::session::run_interactive(editor, &config).await
    }
}

fn build_client(config: &MergedConfig) -> Result<LLMClient> {
    let provider =
        llm::providers::create_provider(config).context("Failed to initialize LLM provider")?;
    tracing::info!("Using {} ({})", provider.name(), provider.model());

    let options = CompletionOptions {
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        json_output: false,
    };
    Ok(LLMClient::with_options(provider, options))
}

fn dry_run(config: &MergedConfig) -> Result<()> {
    if let Some(prompt) = &config.prompt {
        if prompt_length(prompt) < MIN_PROMPT_LENGTH {
            anyhow::bail!("Prompt must be at least {} characters.", MIN_PROMPT_LENGTH);
        }
        let rendered = build_description_prompt(&PromptRequest::new(prompt.as_str()));
        return utils::dry_run::display_dry_run_summary(config, "prompt", &rendered);
    }

    if config.tags.is_empty() {
        anyhow::bail!("--dry-run needs --tags or --prompt");
    }
    let request = TagsRequest::new(&config.tags)?;
    utils::dry_run::display_dry_run_summary(config, "tags", &build_tags_prompt(&request))
}

/// Generate once from the command line, then copy or export as asked.
async fn run_once(editor: &mut Editor, config: &MergedConfig) -> Result<()> {
    let spinner = utils::progress::create_spinner("Generating rules...");
    let notice = match &config.prompt {
        Some(prompt) => editor.submit_prompt(prompt).await,
        None => {
            for tag in config.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
                if !editor.selection().contains(tag) {
                    editor.toggle_tag(tag);
                }
            }
            editor.submit_tags().await
        }
    };
    spinner.finish_and_clear();
    report(&notice, config.quiet)?;

    print_draft(editor.draft());

    if config.copy {
        let mut clipboard = SystemClipboard::new().context("Failed to open the clipboard")?;
        report(&editor.copy_to_clipboard(&mut clipboard), config.quiet)?;
    }

    if config.download {
        let options = WriteOptions::new(&config.output_dir).with_force(config.force);
        report(&editor.download_markdown(&options), config.quiet)?;
    }

    Ok(())
}

/// Show a success notice, or turn a destructive one into an error.
fn report(notice: &editor::Notice, quiet: bool) -> Result<()> {
    if notice.is_destructive() {
        anyhow::bail!("{}", notice);
    }
    if !quiet {
        cli::session::show_notice(notice);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_draft(draft: &str) {
    println!("{}", draft);
}
