//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags** - only when given explicitly
//! 2. **Environment variables** - `GUIDELINES_<SECTION>__<KEY>`, e.g. `GUIDELINES_GENERAL__PROVIDER`
//! 3. **Config files**
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/guidelines/config.toml`
//! 2. `guidelines.toml` in the git repository root
//! 3. `./guidelines.toml`
//! 4. Explicit `--config` path
//!
//! ## Example file
//! ```toml
//! [general]
//! provider = "openai"
//! temperature = 0.4
//!
//! [output]
//! directory = "docs"
//!
//! [tags]
//! predefined = ["Speedrunning", "Retro Gaming"]
//!
//! [providers.ollama]
//! host = "http://gpu-box:11434"
//! model = "llama3.1:70b"
//! ```

use crate::MergedConfig;
use crate::cli::args::{ArgPresence, Args};
use crate::editor::default_tags;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "guidelines.toml";

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub tags: TagsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    pub model: Option<String>,
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub force: bool,
}

/// Tag catalogue offered by the interactive editor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TagsConfig {
    #[serde(default)]
    pub predefined: Vec<String>,
}

/// LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    pub anthropic: Option<ProviderConfig>,
    pub openai: Option<ProviderConfig>,
    pub ollama: Option<OllamaConfig>,
}

/// Configuration for a single hosted LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub model: Option<String>,
    pub max_tokens: Option<usize>,
}

/// Ollama-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub host: Option<String>,
    pub model: Option<String>,
}

impl ProvidersConfig {
    fn model_for(&self, provider: &str) -> Option<String> {
        match provider {
            "anthropic" => self.anthropic.as_ref().and_then(|p| p.model.clone()),
            "openai" => self.openai.as_ref().and_then(|p| p.model.clone()),
            "ollama" => self.ollama.as_ref().and_then(|p| p.model.clone()),
            _ => None,
        }
    }

    fn max_tokens_for(&self, provider: &str) -> Option<usize> {
        match provider {
            "anthropic" => self.anthropic.as_ref().and_then(|p| p.max_tokens),
            "openai" => self.openai.as_ref().and_then(|p| p.max_tokens),
            _ => None,
        }
    }
}

fn discover_config_paths(explicit_path: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    if let Some(git_root) = find_git_root() {
        let git_config = git_root.join(CONFIG_FILE_NAME);
        if git_config.exists() {
            paths.push(git_config);
        }
    }

    let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_dir_config.exists() && !paths.contains(&current_dir_config) {
        paths.push(current_dir_config);
    }

    if explicit_path != Path::new(CONFIG_FILE_NAME) && explicit_path.exists() {
        paths.push(explicit_path.to_path_buf());
    }

    paths
}

fn find_git_root() -> Option<PathBuf> {
    git2::Repository::discover(".")
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("guidelines").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from discovered config files and environment variables.
pub fn load(args: &Args) -> Result<Config> {
    if args.config != Path::new(CONFIG_FILE_NAME) && !args.config.exists() {
        anyhow::bail!("Config file not found: {}", args.config.display());
    }
    load_from_paths(&discover_config_paths(&args.config))
}

/// Build a [`Config`] from explicit files plus `GUIDELINES_*` environment
/// overrides.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<Config> {
    let mut builder = config::Config::builder();

    for config_path in paths {
        tracing::debug!("Loading config file {}", config_path.display());
        builder = builder.add_source(config::File::from(config_path.as_path()));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("GUIDELINES")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let settings = builder.build().context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Merge CLI arguments over file/env configuration.
///
/// A CLI value wins only when it was given explicitly; defaulted CLI values
/// never shadow a configured one.
pub fn merge_config(args: &Args, config: Config, presence: &ArgPresence) -> MergedConfig {
    let provider = if presence.provider {
        args.provider.clone()
    } else {
        config.general.provider.clone()
    };

    let model = if presence.model {
        args.model.clone()
    } else {
        config
            .general
            .model
            .clone()
            .or_else(|| config.providers.model_for(&provider))
    };

    let max_tokens = if presence.max_tokens {
        args.max_tokens
    } else {
        config
            .general
            .max_tokens
            .or_else(|| config.providers.max_tokens_for(&provider))
    };

    let output_dir = if presence.output {
        args.output.clone()
    } else {
        config
            .output
            .directory
            .clone()
            .unwrap_or_else(|| args.output.clone())
    };

    let predefined_tags = if config.tags.predefined.is_empty() {
        default_tags()
    } else {
        config.tags.predefined.clone()
    };

    MergedConfig {
        provider,
        model,
        max_tokens,
        temperature: config.general.temperature,
        ollama_host: config.providers.ollama.and_then(|o| o.host),
        output_dir,
        force: if presence.force {
            args.force
        } else {
            config.output.force
        },
        tags: args.tags.clone(),
        prompt: args.prompt.clone(),
        predefined_tags,
        copy: args.copy,
        download: args.download,
        dry_run: args.dry_run,
        verbose: args.verbose,
        quiet: args.quiet,
    }
}
