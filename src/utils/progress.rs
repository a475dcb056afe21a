use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a generation request is in flight.
///
/// When stderr is not a terminal the spinner is hidden so piped output stays
/// clean.
#[must_use]
pub fn create_spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to parse spinner template: {e}");
            ProgressStyle::default_spinner()
        });
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner_keeps_message() {
        let spinner = create_spinner("Generating rules...");
        // Under the test harness stderr is usually captured, giving a hidden bar
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
