//! Interactive terminal front end for the [`Editor`].
//!
//! `dialoguer` prompts are blocking, so each one runs on the blocking pool and
//! hands its answer back to the async loop, which then drives the editor.

use crate::MergedConfig;
use crate::editor::notice::titles;
use crate::editor::{Editor, EditorState, Notice, NoticeLevel, SystemClipboard};
use crate::generator::MIN_PROMPT_LENGTH;
use crate::output::WriteOptions;
use crate::utils::progress::create_spinner;
use anyhow::{Context, Result};
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    GenerateWithTags,
    GenerateWithPrompt,
    EditRules,
    ShowRules,
    CopyRules,
    DownloadMarkdown,
    Quit,
}

impl MenuAction {
    const ALL: [Self; 7] = [
        Self::GenerateWithTags,
        Self::GenerateWithPrompt,
        Self::EditRules,
        Self::ShowRules,
        Self::CopyRules,
        Self::DownloadMarkdown,
        Self::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::GenerateWithTags => "Generate with Tags",
            Self::GenerateWithPrompt => "Inspire Me (Custom Prompt)",
            Self::EditRules => "Edit Rules",
            Self::ShowRules => "Show Rules",
            Self::CopyRules => "Copy Rules",
            Self::DownloadMarkdown => "Download as Markdown",
            Self::Quit => "Quit",
        }
    }
}

/// Print a notice to stderr, styled by level.
pub fn show_notice(notice: &Notice) {
    let term = Term::stderr();
    let line = match notice.level {
        NoticeLevel::Success => format!(
            "{} {} {}",
            style("\u{2713}").green(),
            style(&notice.title).green().bold(),
            notice.description
        ),
        NoticeLevel::Destructive => format!(
            "{} {} {}",
            style("\u{2717}").red(),
            style(&notice.title).red().bold(),
            notice.description
        ),
    };
    if let Err(e) = term.write_line(&line) {
        tracing::warn!("Failed to write notice: {}", e);
    }
}

/// Run the interactive editor until the user quits.
pub async fn run_interactive(mut editor: Editor, config: &MergedConfig) -> Result<()> {
    if !Term::stdout().is_term() {
        anyhow::bail!(
            "Interactive mode needs a terminal; pass --tags or --prompt to generate directly"
        );
    }

    let write_options = WriteOptions::new(&config.output_dir).with_force(config.force);

    print_header(&editor)?;

    loop {
        let action = choose_action(editor.state()).await?;
        tracing::debug!(?action, "Menu action selected");

        match action {
            MenuAction::GenerateWithTags => {
                let picked =
                    choose_tags(config.predefined_tags.clone(), editor.selection().tags()).await?;
                let Some(picked) = picked else { continue };
                apply_selection(&mut editor, &config.predefined_tags, &picked);

                let spinner = create_spinner("Generating rules...");
                let notice = editor.submit_tags().await;
                spinner.finish_and_clear();
                show_notice(&notice);
                show_draft(&editor)?;
            }
            MenuAction::GenerateWithPrompt => {
                let Some(prompt) = ask_prompt().await? else {
                    continue;
                };

                let spinner = create_spinner("Generating rules...");
                let notice = editor.submit_prompt(&prompt).await;
                spinner.finish_and_clear();
                show_notice(&notice);
                show_draft(&editor)?;
            }
            MenuAction::EditRules => {
                if let Some(notice) = editor.check_editable() {
                    show_notice(&notice);
                    continue;
                }
                if let Some(edited) = edit_in_editor(editor.draft().to_string()).await? {
                    if let Some(notice) = editor.edit_draft(edited) {
                        show_notice(&notice);
                    }
                }
            }
            MenuAction::ShowRules => show_draft(&editor)?,
            MenuAction::CopyRules => match SystemClipboard::new() {
                Ok(mut clipboard) => show_notice(&editor.copy_to_clipboard(&mut clipboard)),
                Err(e) => {
                    tracing::error!("Error opening clipboard: {}", e);
                    show_notice(&Notice::destructive(
                        titles::COPY_FAILED,
                        "Could not access the clipboard.",
                    ));
                }
            },
            MenuAction::DownloadMarkdown => show_notice(&editor.download_markdown(&write_options)),
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

/// Bring the editor's selection in line with what the user ticked, toggling
/// only the tags that changed.
fn apply_selection(editor: &mut Editor, catalogue: &[String], picked: &[usize]) {
    for (index, tag) in catalogue.iter().enumerate() {
        let wanted = picked.contains(&index);
        if wanted != editor.selection().contains(tag) {
            editor.toggle_tag(tag);
        }
    }
}

fn print_header(editor: &Editor) -> Result<()> {
    let term = Term::stderr();
    term.write_line(&format!(
        "{}",
        style("Create Your Community Guidelines").bold()
    ))?;
    term.write_line(
        "Use AI to generate a starting point for your community rules. Choose tags or describe your community.",
    )?;
    term.write_line(&format!(
        "{}",
        style(format!(
            "Using {} ({})",
            editor.client().provider_name(),
            editor.client().model()
        ))
        .dim()
    ))?;
    Ok(())
}

fn show_draft(editor: &Editor) -> Result<()> {
    let term = Term::stdout();
    if editor.draft().is_empty() {
        term.write_line(&format!(
            "{}",
            style("Your generated community guidelines will appear here.").dim()
        ))?;
        return Ok(());
    }

    term.write_line("")?;
    term.write_line(&format!("{}", style("Generated Rules").bold().underlined()))?;
    for line in editor.draft().lines() {
        term.write_line(line)?;
    }
    term.write_line("")?;
    Ok(())
}

async fn choose_action(state: EditorState) -> Result<MenuAction> {
    let default = if state == EditorState::Ready { 2 } else { 0 };
    let index = tokio::task::spawn_blocking(move || {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(default)
            .interact_opt()
    })
    .await
    .context("Menu prompt task failed")??;

    Ok(index
        .and_then(|i| MenuAction::ALL.get(i).copied())
        .unwrap_or(MenuAction::Quit))
}

async fn choose_tags(catalogue: Vec<String>, selected: &[String]) -> Result<Option<Vec<usize>>> {
    let defaults: Vec<bool> = catalogue.iter().map(|t| selected.contains(t)).collect();
    let picked = tokio::task::spawn_blocking(move || {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select Community Tags (space to toggle, enter to generate)")
            .items(&catalogue)
            .defaults(&defaults)
            .interact_opt()
    })
    .await
    .context("Tag prompt task failed")??;
    Ok(picked)
}

async fn ask_prompt() -> Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Describe Your Community")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.is_empty() || input.chars().count() >= MIN_PROMPT_LENGTH {
                    Ok(())
                } else {
                    Err(format!(
                        "Prompt must be at least {} characters.",
                        MIN_PROMPT_LENGTH
                    ))
                }
            })
            .interact_text()
    })
    .await
    .context("Prompt input task failed")??;

    // An empty answer backs out to the menu
    Ok((!answer.is_empty()).then_some(answer))
}

async fn edit_in_editor(draft: String) -> Result<Option<String>> {
    let edited = tokio::task::spawn_blocking(move || {
        dialoguer::Editor::new()
            .extension(".md")
            .require_save(true)
            .edit(&draft)
    })
    .await
    .context("Editor task failed")??;
    Ok(edited.map(|text| text.trim_end_matches('\n').to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_are_unique() {
        let mut labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }

    #[test]
    fn test_menu_includes_both_generation_modes() {
        assert_eq!(MenuAction::ALL[0].label(), "Generate with Tags");
        assert_eq!(MenuAction::ALL[1].label(), "Inspire Me (Custom Prompt)");
    }
}
