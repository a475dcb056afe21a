use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `GUIDELINES_*` and are overridden
/// by CLI flags. Example: `GUIDELINES_PROVIDER=openai` is overridden by
/// `--provider anthropic`.
///
/// Without `--tags` or `--prompt` the interactive editor starts.
#[derive(Parser, Debug)]
#[command(name = "guidelines")]
#[command(about = "Draft community guidelines from tags or a description with an LLM")]
#[command(version)]
pub struct Args {
    /// Community tags, comma-separated (skips the interactive editor)
    #[arg(short, long, value_delimiter = ',', conflicts_with = "prompt")]
    pub tags: Vec<String>,

    /// Describe your community (skips the interactive editor)
    #[arg(long)]
    pub prompt: Option<String>,

    /// LLM provider
    #[arg(short, long, default_value = "anthropic", env = "GUIDELINES_PROVIDER")]
    pub provider: String,

    /// Model to use
    #[arg(short, long, env = "GUIDELINES_MODEL")]
    pub model: Option<String>,

    /// Maximum tokens in the generated answer
    #[arg(long, env = "GUIDELINES_MAX_TOKENS")]
    pub max_tokens: Option<usize>,

    /// Directory the Markdown export is written to
    #[arg(short, long, default_value = ".", env = "GUIDELINES_OUTPUT_DIR")]
    pub output: PathBuf,

    /// Copy the generated rules to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write the generated rules to community-guidelines.md
    #[arg(long)]
    pub download: bool,

    /// Overwrite an existing export (a .bak copy is kept)
    #[arg(long, env = "GUIDELINES_FORCE")]
    pub force: bool,

    /// Config file path
    #[arg(short, long, default_value = "guidelines.toml", env = "GUIDELINES_CONFIG")]
    pub config: PathBuf,

    /// Print the prompt that would be sent without calling the LLM
    #[arg(long, env = "GUIDELINES_DRY_RUN")]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short)]
    pub quiet: bool,
}

/// Which options were given explicitly (command line or environment) rather
/// than filled in from a default. Only explicit values override config files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgPresence {
    pub provider: bool,
    pub model: bool,
    pub max_tokens: bool,
    pub output: bool,
    pub force: bool,
}

impl ArgPresence {
    fn from_matches(matches: &ArgMatches) -> Self {
        let explicit = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };
        Self {
            provider: explicit("provider"),
            model: explicit("model"),
            max_tokens: explicit("max_tokens"),
            output: explicit("output"),
            force: explicit("force"),
        }
    }
}

pub fn parse() -> Result<(Args, ArgPresence), clap::Error> {
    parse_from(std::env::args_os())
}

pub fn parse_from<I, T>(itr: I) -> Result<(Args, ArgPresence), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Args::command().try_get_matches_from(itr)?;
    let presence = ArgPresence::from_matches(&matches);
    let args = Args::from_arg_matches(&matches)?;
    Ok((args, presence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_not_explicit() {
        let (args, presence) = parse_from(["guidelines"]).unwrap();
        assert_eq!(args.provider, "anthropic");
        assert!(args.tags.is_empty());
        assert!(args.prompt.is_none());
        assert!(!presence.provider);
        assert!(!presence.output);
    }

    #[test]
    fn test_tags_are_comma_separated() {
        let (args, _) = parse_from(["guidelines", "--tags", "Gaming,Book Club"]).unwrap();
        assert_eq!(args.tags, ["Gaming", "Book Club"]);
    }

    #[test]
    fn test_explicit_flags_are_tracked() {
        let (args, presence) =
            parse_from(["guidelines", "-p", "openai", "-o", "out", "--force"]).unwrap();
        assert_eq!(args.provider, "openai");
        assert_eq!(args.output, PathBuf::from("out"));
        assert!(presence.provider);
        assert!(presence.output);
        assert!(presence.force);
        assert!(!presence.model);
    }

    #[test]
    fn test_tags_conflict_with_prompt() {
        let result = parse_from([
            "guidelines",
            "--tags",
            "Gaming",
            "--prompt",
            "A friendly gaming server",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let (args, _) = parse_from(["guidelines", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
