//! Bordered panel shared by every widget on the page

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders},
};

pub const FOCUS_COLOR: Color = Color::Cyan;
pub const ACCENT_COLOR: Color = Color::Yellow;

/// Rounded block with the widget title. The focused panel gets a bold,
/// highlighted border.
pub fn panel(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(format!(" {} ", title))
}
