use crate::utils::error::GuidelinesError;
use cli_clipboard::{ClipboardContext, ClipboardProvider};

/// Somewhere the draft can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), GuidelinesError>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    context: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, GuidelinesError> {
        let context =
            ClipboardContext::new().map_err(|e| GuidelinesError::Clipboard(e.to_string()))?;
        Ok(Self { context })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), GuidelinesError> {
        self.context
            .set_contents(text.to_string())
            .map_err(|e| GuidelinesError::Clipboard(e.to_string()))
    }
}
