//! Clipboard integration for the context menu's copy entries
//!
//! Uses arboard for cross-platform clipboard access. On Linux the clipboard
//! contents are served by the process that set them, so one handle is kept
//! for the lifetime of the app instead of being dropped after each copy.

use anyhow::Result;
use arboard::Clipboard;

#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy text to the system clipboard
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let clipboard = match &mut self.handle {
            Some(clipboard) => clipboard,
            slot => slot.insert(Clipboard::new()?),
        };
        clipboard.set_text(text.to_string())?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
