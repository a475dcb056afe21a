//! Dry-run mode display for previewing a generation request.
//!
//! Shows the backend that would be called and the exact prompt it would
//! receive, without making any LLM calls.

use crate::MergedConfig;
use anyhow::Result;
use console::{Term, style};
use std::io::Write;

/// Display what a generation run would send.
///
/// `source` names the request variant ("tags" or "prompt").
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_dry_run_summary(config: &MergedConfig, source: &str, prompt: &str) -> Result<()> {
    let mut term = Term::stdout();

    writeln!(term)?;
    writeln!(
        term,
        "{} - No LLM calls will be made",
        style("Dry Run").yellow().bold()
    )?;
    writeln!(term)?;

    let rows = [
        ("Provider", config.provider.clone()),
        (
            "Model",
            config.model.clone().unwrap_or_else(|| "default".to_string()),
        ),
        ("Source", source.to_string()),
        ("Output", config.output_dir.display().to_string()),
    ];
    for (index, (label, value)) in rows.iter().enumerate() {
        let prefix = if index == rows.len() - 1 {
            "\u{2514}\u{2500}"
        } else {
            "\u{251c}\u{2500}"
        };
        writeln!(term, "{} {:<9} {}", style(prefix).dim(), label, value)?;
    }

    writeln!(term)?;
    writeln!(term, "{}:", style("Prompt").bold())?;
    for line in prompt.lines() {
        writeln!(term, "  {}", line)?;
    }
    writeln!(term)?;

    Ok(())
}
