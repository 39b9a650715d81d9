//! Pomodoro and stopwatch panels.
//!
//! Both timers share this view: the clock reading, a one-word state line and
//! the button row the keys map onto.

use super::panel::{panel, ACCENT_COLOR};
use crate::widgets::{TimerPhase, TimerState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct TimerView<'a> {
    timer: &'a TimerState,
    focused: bool,
}

impl<'a> TimerView<'a> {
    pub fn new(timer: &'a TimerState, focused: bool) -> Self {
        Self { timer, focused }
    }

    fn state_label(&self) -> (&'static str, Color) {
        match self.timer.phase() {
            TimerPhase::Running => ("Running", Color::Green),
            TimerPhase::Expired => ("Time's up!", Color::Red),
            TimerPhase::Idle if self.timer.value_ms() == self.timer.default_ms() => {
                ("Ready", Color::Gray)
            }
            TimerPhase::Idle => ("Paused", ACCENT_COLOR),
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = panel(self.timer.kind().title(), self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (label, label_color) = self.state_label();
        let toggle = if self.timer.is_running() {
            "[Pause]"
        } else {
            "[Start]"
        };

        let mut lines = vec![
            Line::from(Span::styled(
                self.timer.display(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(label_color))),
            Line::from(format!("{} [Reset]", toggle)),
        ];

        // Center the block of lines vertically when there is room
        let padding = inner.height.saturating_sub(lines.len() as u16) / 2;
        for _ in 0..padding {
            lines.insert(0, Line::default());
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
