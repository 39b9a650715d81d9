//! Text fields owned by the TUI: the todo input line and the scratchpad.
//!
//! The core decides what a key means. Keys it hands back as
//! `ForwardToEditor` are fed to the focused field here, and finished text is
//! pushed back into the core.

use super::widget_traits::TextEditable;
use crate::clipboard::SystemClipboard;
use crate::core::{AppCore, InputResult, WidgetId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use std::time::Instant;
use tui_textarea::{Input, Key, TextArea};

pub const TODO_PLACEHOLDER: &str = "Add a new task...";
pub const SCRATCHPAD_PLACEHOLDER: &str = "Write your notes here...";

/// A tui-textarea field in single-line or multi-line mode
pub struct TextEditor {
    field: TextArea<'static>,
    multiline: bool,
    placeholder: &'static str,
}

impl TextEditor {
    pub fn single_line(placeholder: &'static str) -> Self {
        Self::build("", false, placeholder)
    }

    pub fn multi_line(initial: &str, placeholder: &'static str) -> Self {
        Self::build(initial, true, placeholder)
    }

    fn build(initial: &str, multiline: bool, placeholder: &'static str) -> Self {
        let field = if initial.is_empty() {
            TextArea::default()
        } else {
            TextArea::new(initial.split('\n').map(String::from).collect())
        };
        let mut editor = Self {
            field,
            multiline,
            placeholder,
        };
        editor.apply_style();
        editor
    }

    fn apply_style(&mut self) {
        self.field.set_placeholder_text(self.placeholder);
        self.field.set_cursor_line_style(Style::default());
    }

    /// Show the cursor only while the owning widget has focus
    pub fn set_focused(&mut self, focused: bool) {
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.field.set_cursor_style(style);
    }

    /// Feed one key to the field. Returns true if the text changed.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let input: Input = KeyEvent::new(code, modifiers).into();
        if !self.multiline
            && (input.key == Key::Enter || (input.ctrl && input.key == Key::Char('m')))
        {
            return false;
        }
        self.field.input(input)
    }

    pub fn clear(&mut self) {
        self.field = TextArea::default();
        self.apply_style();
    }
}

impl TextEditable for TextEditor {
    fn field(&self) -> &TextArea<'static> {
        &self.field
    }

    fn field_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.field
    }

    fn insert_text(&mut self, text: &str) {
        if self.multiline {
            self.field.insert_str(text);
        } else {
            let flat = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
            self.field.insert_str(flat);
        }
    }
}

/// Editors for the two text widgets on the page
pub struct Editors {
    pub todo_input: TextEditor,
    pub scratchpad: TextEditor,
    clipboard: SystemClipboard,
}

impl Editors {
    /// Seed the scratchpad field from the text the core loaded
    pub fn new(core: &AppCore) -> Self {
        Self {
            todo_input: TextEditor::single_line(TODO_PLACEHOLDER),
            scratchpad: TextEditor::multi_line(core.scratchpad.text(), SCRATCHPAD_PLACEHOLDER),
            clipboard: SystemClipboard::new(),
        }
    }

    pub fn sync_focus(&mut self, focus: WidgetId) {
        self.todo_input.set_focused(focus == WidgetId::Todo);
        self.scratchpad.set_focused(focus == WidgetId::Scratchpad);
    }

    /// Route a key through the core, then finish editor-related results
    pub fn handle_key(
        &mut self,
        core: &mut AppCore,
        code: KeyCode,
        modifiers: KeyModifiers,
        now: Instant,
    ) -> InputResult {
        let result = core.handle_key(code, modifiers, now);

        match result {
            InputResult::ForwardToEditor => match core.focus {
                WidgetId::Todo => {
                    self.todo_input.handle_key(code, modifiers);
                }
                WidgetId::Scratchpad => {
                    if self.scratchpad.handle_key(code, modifiers) {
                        core.update_scratchpad(self.scratchpad.text());
                    }
                }
                _ => {}
            },
            InputResult::SubmitTodo => {
                if core.submit_todo(&self.todo_input.text()) {
                    self.todo_input.clear();
                }
            }
            InputResult::CopyScratchpad => {
                match self.scratchpad.copy_all_to_clipboard(&mut self.clipboard) {
                    Ok(()) => core.status_text = "Copied scratchpad to clipboard".to_string(),
                    Err(e) => {
                        tracing::warn!("Clipboard copy failed: {:#}", e);
                        core.status_text = "Clipboard unavailable".to_string();
                    }
                }
            }
            InputResult::PasteScratchpad => {
                match self.scratchpad.paste_from_clipboard(&mut self.clipboard) {
                    Ok(()) => core.update_scratchpad(self.scratchpad.text()),
                    Err(e) => {
                        tracing::warn!("Clipboard paste failed: {:#}", e);
                        core.status_text = "Clipboard unavailable".to_string();
                    }
                }
            }
            InputResult::Handled | InputResult::Ignored | InputResult::Quit => {}
        }

        result
    }

    /// Bracketed paste goes to whichever text field has focus
    pub fn handle_paste(&mut self, core: &mut AppCore, text: &str) {
        match core.focus {
            WidgetId::Todo => {
                self.todo_input.insert_text(text);
                core.needs_render = true;
            }
            WidgetId::Scratchpad => {
                self.scratchpad.insert_text(text);
                core.update_scratchpad(self.scratchpad.text());
                core.needs_render = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::WidgetStore;

    fn core() -> AppCore {
        AppCore::new(Config::default(), WidgetStore::ephemeral())
    }

    fn type_str(editors: &mut Editors, core: &mut AppCore, text: &str) {
        for c in text.chars() {
            editors.handle_key(core, KeyCode::Char(c), KeyModifiers::NONE, Instant::now());
        }
    }

    #[test]
    fn test_single_line_rejects_newline() {
        let mut editor = TextEditor::single_line(TODO_PLACEHOLDER);
        assert!(editor.handle_key(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(!editor.handle_key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(!editor.handle_key(KeyCode::Char('m'), KeyModifiers::CONTROL));
        assert_eq!(editor.field().lines().len(), 1);

        editor.insert_text("b\nc");
        assert_eq!(editor.text(), "ab c");
    }

    #[test]
    fn test_keys_reach_textarea() {
        let mut editor = TextEditor::single_line(TODO_PLACEHOLDER);
        for c in "ab".chars() {
            editor.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        editor.handle_key(KeyCode::Left, KeyModifiers::NONE);
        editor.handle_key(KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert_eq!(editor.text(), "aCb");

        assert!(editor.handle_key(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(editor.text(), "ab");
        assert!(!editor.handle_key(KeyCode::Insert, KeyModifiers::NONE));
    }

    #[test]
    fn test_multi_line_seeded_from_text() {
        let editor = TextEditor::multi_line("one\ntwo", SCRATCHPAD_PLACEHOLDER);
        assert_eq!(editor.field().lines(), ["one", "two"]);
        assert_eq!(editor.text(), "one\ntwo");
    }

    #[test]
    fn test_typing_and_submitting_todo() {
        let mut core = core();
        let mut editors = Editors::new(&core);

        type_str(&mut editors, &mut core, "Buy milk");
        assert_eq!(editors.todo_input.text(), "Buy milk");

        let result =
            editors.handle_key(&mut core, KeyCode::Enter, KeyModifiers::NONE, Instant::now());
        assert_eq!(result, InputResult::SubmitTodo);
        assert_eq!(core.todo.items()[0].text, "Buy milk");
        assert_eq!(editors.todo_input.text(), "");
    }

    #[test]
    fn test_blank_todo_keeps_input() {
        let mut core = core();
        let mut editors = Editors::new(&core);

        type_str(&mut editors, &mut core, "   ");
        editors.handle_key(&mut core, KeyCode::Enter, KeyModifiers::NONE, Instant::now());
        assert!(core.todo.items().is_empty());
        assert_eq!(editors.todo_input.text(), "   ");
    }

    #[test]
    fn test_scratchpad_edits_reach_core() {
        let mut core = core();
        core.focus = WidgetId::Scratchpad;
        let mut editors = Editors::new(&core);

        type_str(&mut editors, &mut core, "hi");
        editors.handle_key(&mut core, KeyCode::Enter, KeyModifiers::NONE, Instant::now());
        type_str(&mut editors, &mut core, "there");
        assert_eq!(core.scratchpad.text(), "hi\nthere");
    }

    #[test]
    fn test_scratchpad_editor_starts_with_saved_text() {
        let mut core = core();
        core.update_scratchpad("kept".to_string());
        let editors = Editors::new(&core);
        assert_eq!(editors.scratchpad.text(), "kept");
    }

    #[test]
    fn test_paste_event_targets_focused_field() {
        let mut core = core();
        let mut editors = Editors::new(&core);

        editors.handle_paste(&mut core, "task\nname");
        assert_eq!(editors.todo_input.text(), "task name");

        core.focus = WidgetId::Music;
        editors.handle_paste(&mut core, "ignored");
        assert_eq!(core.scratchpad.text(), "");

        core.focus = WidgetId::Scratchpad;
        editors.handle_paste(&mut core, "a\nb");
        assert_eq!(core.scratchpad.text(), "a\nb");
    }
}
