//! Behavior traits for text-editing widgets

use crate::clipboard::SystemClipboard;
use anyhow::Result;
use tui_textarea::TextArea;

/// Trait for widgets backed by a text field (todo input, scratchpad)
pub trait TextEditable {
    /// Get reference to the text field
    fn field(&self) -> &TextArea<'static>;

    /// Get mutable reference to the text field
    fn field_mut(&mut self) -> &mut TextArea<'static>;

    /// Full text with lines joined by `\n`
    fn text(&self) -> String {
        self.field().lines().join("\n")
    }

    /// Insert text at the cursor
    fn insert_text(&mut self, text: &str) {
        self.field_mut().insert_str(text);
    }

    /// Copy the whole text to the clipboard (Ctrl+Y)
    fn copy_all_to_clipboard(&self, clipboard: &mut SystemClipboard) -> Result<()> {
        clipboard.copy(&self.text())
    }

    /// Paste clipboard text at the cursor (Ctrl+V)
    fn paste_from_clipboard(&mut self, clipboard: &mut SystemClipboard) -> Result<()> {
        let text = clipboard.paste()?;
        self.insert_text(&text);
        Ok(())
    }
}
