//! Markdown export of a rules draft.

/// File name offered for the exported document.
pub const MARKDOWN_FILENAME: &str = "community-guidelines.md";

/// MIME type of the exported document.
pub const MARKDOWN_MIME: &str = "text/markdown";

const ATTRIBUTION: &str = "*These rules were generated with Guidelines AI.*";

/// Render `draft` as a Markdown guidelines document.
///
/// Each non-blank line of the draft becomes one list item under
/// `## Our Rules`; blank lines are dropped.
pub fn render_markdown(draft: &str) -> String {
    let items = draft
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Community Guidelines\n\n## Our Rules\n{}\n\n---\n{}\n",
        items, ATTRIBUTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_two_rules() {
        let doc = render_markdown("Rule A\nRule B");
        assert_eq!(
            doc,
            "# Community Guidelines\n\n## Our Rules\n- Rule A\n- Rule B\n\n---\n*These rules were generated with Guidelines AI.*\n"
        );
    }

    #[test]
    fn test_render_markdown_skips_blank_lines() {
        let doc = render_markdown("Be kind\n\n   \nNo spam\r\n");
        let items: Vec<&str> = doc.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(items, ["- Be kind", "- No spam"]);
    }

    #[test]
    fn test_render_markdown_ends_with_attribution() {
        let doc = render_markdown("Only rule");
        assert!(doc.trim_end().ends_with(ATTRIBUTION));
        assert!(doc.contains("\n---\n"));
    }
}
