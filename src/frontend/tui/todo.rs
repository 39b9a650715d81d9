//! Todo panel: input line on top, items below.

use super::editors::TextEditor;
use super::panel::{panel, FOCUS_COLOR};
use super::widget_traits::TextEditable;
use crate::widgets::TodoListState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub struct TodoView<'a> {
    todos: &'a TodoListState,
    input: &'a TextEditor,
    focused: bool,
}

impl<'a> TodoView<'a> {
    pub fn new(todos: &'a TodoListState, input: &'a TextEditor, focused: bool) -> Self {
        Self {
            todos,
            input,
            focused,
        }
    }

    fn item_line(text: &str, completed: bool) -> ListItem<'static> {
        let (mark, style) = if completed {
            (
                "[x] ",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", Style::default())
        };
        ListItem::new(Line::from(vec![
            Span::raw(mark),
            Span::styled(text.to_string(), style),
        ]))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = panel("TODO App", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let [input_area, rule_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        Widget::render(self.input.field(), input_area, buf);
        Paragraph::new("─".repeat(rule_area.width as usize))
            .style(Style::default().fg(Color::DarkGray))
            .render(rule_area, buf);

        if self.todos.items().is_empty() {
            Paragraph::new(Span::styled(
                "No tasks yet",
                Style::default().fg(Color::DarkGray),
            ))
            .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .todos
            .items()
            .iter()
            .map(|item| Self::item_line(&item.text, item.completed))
            .collect();

        let highlight = if self.focused {
            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(self.todos.selected());
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::super::editors::TODO_PLACEHOLDER;
    use super::super::panel::test_support::{contains, render_rows};
    use super::*;
    use crate::store::WidgetStore;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_empty_list_shows_placeholders() {
        let todos = TodoListState::load(WidgetStore::ephemeral());
        let input = TextEditor::single_line(TODO_PLACEHOLDER);
        let rows = render_rows(40, 8, |area, buf| {
            TodoView::new(&todos, &input, true).render(area, buf)
        });
        assert!(contains(&rows, "TODO App"));
        assert!(contains(&rows, "Add a new task..."));
        assert!(contains(&rows, "No tasks yet"));
    }

    #[test]
    fn test_items_with_completion_marks() {
        let mut todos = TodoListState::load(WidgetStore::ephemeral());
        todos.add("Write report");
        todos.add("Walk dog");
        todos.toggle(0);
        let mut input = TextEditor::single_line(TODO_PLACEHOLDER);
        input.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);

        let rows = render_rows(40, 8, |area, buf| {
            TodoView::new(&todos, &input, true).render(area, buf)
        });
        assert!(contains(&rows, "[x] Write report"));
        assert!(contains(&rows, "[ ] Walk dog"));
        assert!(contains(&rows, "> "));
        assert!(!contains(&rows, "Add a new task..."));
    }

    #[test]
    fn test_completed_item_is_crossed_out() {
        let mut todos = TodoListState::load(WidgetStore::ephemeral());
        todos.add("Done");
        todos.toggle(0);
        let input = TextEditor::single_line(TODO_PLACEHOLDER);

        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        TodoView::new(&todos, &input, false).render(area, &mut buf);

        // Row 3 is the first item: border, input, rule, item
        let row = 3;
        let start = (0..area.width)
            .find(|&x| buf[(x, row)].symbol() == "D")
            .expect("item text rendered");
        assert!(buf[(start, row)]
            .modifier
            .contains(Modifier::CROSSED_OUT));
    }
}
