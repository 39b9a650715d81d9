use super::editors::Editors;
use super::music::MusicView;
use super::scratchpad::ScratchpadView;
use super::tic_tac_toe::TicTacToeView;
use super::timer::TimerView;
use super::todo::TodoView;
use crate::core::{AppCore, WidgetId};
use crate::frontend::Frontend;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;

/// TUI Frontend using ratatui
///
/// Owns the terminal and the text editors. Widget state stays in `AppCore`.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    pub editors: Editors,
    restored: bool,
}

impl TuiFrontend {
    /// Enter raw mode and the alternate screen with bracketed paste enabled
    pub fn new(core: &AppCore) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            editors: Editors::new(core),
            restored: false,
        })
    }
}

/// Split the screen into the 2x3 widget grid plus a one-line status bar.
///
/// Grid cells follow `WidgetId::ALL` order.
pub fn page_layout(area: Rect) -> ([Rect; 6], Rect) {
    let [grid, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(grid);

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ]);
    let [a, b, c] = columns.areas(top);
    let [d, e, f] = columns.areas(bottom);
    ([a, b, c, d, e, f], status)
}

fn status_line(core: &AppCore) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", core.focus.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(core.focus.key_hints()),
        Span::styled(
            "  Tab:Next  Ctrl+Q:Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if !core.status_text.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            core.status_text.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

/// Draw every widget and the status bar into `buf`
pub fn render_page(core: &AppCore, editors: &Editors, area: Rect, buf: &mut Buffer) {
    let (cells, status) = page_layout(area);

    for (id, rect) in WidgetId::ALL.iter().zip(cells) {
        let focused = core.focus == *id;
        match id {
            WidgetId::Todo => TodoView::new(&core.todo, &editors.todo_input, focused).render(rect, buf),
            WidgetId::Pomodoro => TimerView::new(&core.pomodoro, focused).render(rect, buf),
            WidgetId::Stopwatch => TimerView::new(&core.stopwatch, focused).render(rect, buf),
            WidgetId::TicTacToe => TicTacToeView::new(&core.tic_tac_toe, focused).render(rect, buf),
            WidgetId::Music => MusicView::new(&core.music, focused).render(rect, buf),
            WidgetId::Scratchpad => {
                ScratchpadView::new(&editors.scratchpad, focused).render(rect, buf)
            }
        }
    }

    Paragraph::new(status_line(core)).render(status, buf);
}

impl Frontend for TuiFrontend {
    fn render(&mut self, core: &AppCore) -> Result<()> {
        self.editors.sync_focus(core.focus);
        let editors = &self.editors;
        self.terminal
            .draw(|f| {
                let area = f.area();
                render_page(core, editors, area, f.buffer_mut());
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
