use anyhow::Result;
use guidelines::utils::error::{GuidelinesError, format_error};
use guidelines::{cli, run};

#[tokio::main]
async fn main() {
    // Config is not parsed yet when early errors happen
    let verbose = std::env::args().any(|arg| arg.starts_with("-v") && !arg.starts_with("--"));

    if let Err(e) = run_main().await {
        display_error(&e, verbose);
        std::process::exit(1);
    }
}

/// Display an error with contextual formatting.
///
/// Tries to downcast to `GuidelinesError` for rich formatting, falls back to
/// anyhow's error chain display for other errors.
fn display_error(error: &anyhow::Error, verbose: bool) {
    if let Some(err) = error.downcast_ref::<GuidelinesError>() {
        eprintln!("{}", format_error(err, verbose));
        return;
    }

    eprintln!("\n\u{26a0} Error: {}", error);

    let causes: Vec<_> = error.chain().skip(1).collect();
    if !causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            let prefix = if i == causes.len() - 1 {
                "\u{2514}\u{2500}"
            } else {
                "\u{251c}\u{2500}"
            };
            eprintln!("{} {}", prefix, cause);
        }
    }

    if verbose {
        let backtrace = error.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:\n{}", backtrace);
        }
    }
}

async fn run_main() -> Result<()> {
    // Parse CLI arguments (includes env vars) and track which flags were explicitly provided
    let (args, presence) = match cli::args::parse() {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    let config = cli::config::load(&args)?;

    // CLI args override config files only when explicitly provided
    let merged_config = cli::config::merge_config(&args, config, &presence);

    guidelines::init_logging(merged_config.verbose, merged_config.quiet);

    run(merged_config).await
}
