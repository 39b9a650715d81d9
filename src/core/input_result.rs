//! Unified enum describing what should happen after the core handles a key.
//!
//! The core owns widget state but not the text editors, which live in the
//! frontend. Results that involve an editor or the clipboard are handed back
//! to the event loop to finish.

/// Result of routing one key press through [`AppCore`](super::AppCore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Key changed core state; redraw
    Handled,

    /// Key means nothing to the focused widget
    Ignored,

    /// Key belongs to the focused text editor (todo input or scratchpad)
    ForwardToEditor,

    /// Add the todo input line as a new item and clear it
    SubmitTodo,

    /// Copy the scratchpad text to the clipboard
    CopyScratchpad,

    /// Insert clipboard text into the scratchpad editor
    PasteScratchpad,

    /// Leave the application
    Quit,
}

impl InputResult {
    /// Whether the event loop should redraw after this result
    pub fn needs_render(&self) -> bool {
        !matches!(self, InputResult::Ignored)
    }
}
