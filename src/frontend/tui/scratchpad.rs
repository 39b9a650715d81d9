//! Scratchpad panel: a free-text area.

use super::editors::TextEditor;
use super::panel::panel;
use super::widget_traits::TextEditable;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub struct ScratchpadView<'a> {
    editor: &'a TextEditor,
    focused: bool,
}

impl<'a> ScratchpadView<'a> {
    pub fn new(editor: &'a TextEditor, focused: bool) -> Self {
        Self { editor, focused }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = panel("Scratchpad", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        Widget::render(self.editor.field(), inner, buf);
    }
}
