//! Clipboard integration for the scratchpad
//!
//! Uses arboard. The handle is opened on first use and then kept alive,
//! since on X11 copied text disappears once its owning handle is dropped.

use anyhow::{Context, Result};
use arboard::Clipboard;

#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("Clipboard unavailable")?);
        }
        self.inner.as_mut().context("Clipboard unavailable")
    }

    /// Copy text to the system clipboard. Empty text leaves it untouched.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        self.handle()?.set_text(text.to_string())?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }

    /// Read text from the system clipboard
    pub fn paste(&mut self) -> Result<String> {
        let text = self.handle()?.get_text()?;
        tracing::debug!("Pasted {} bytes from clipboard", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_paste() {
        let mut clipboard = SystemClipboard::new();
        clipboard.copy("Scratchpad notes").expect("Copy failed");
        assert_eq!(clipboard.paste().expect("Paste failed"), "Scratchpad notes");
    }

    #[test]
    fn test_empty_copy_does_not_open_clipboard() {
        let mut clipboard = SystemClipboard::new();
        assert!(clipboard.copy("").is_ok());
        assert!(clipboard.inner.is_none());
    }
}
