//! Tic-tac-toe panel: 3x3 grid, move cursor and game status line.

use super::panel::{panel, ACCENT_COLOR, FOCUS_COLOR};
use crate::widgets::tic_tac_toe::{Cell, Outcome};
use crate::widgets::TicTacToeState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const ROW_SEPARATOR: &str = "───┼───┼───";

pub struct TicTacToeView<'a> {
    game: &'a TicTacToeState,
    focused: bool,
}

impl<'a> TicTacToeView<'a> {
    pub fn new(game: &'a TicTacToeState, focused: bool) -> Self {
        Self { game, focused }
    }

    fn status_line(&self) -> Line<'static> {
        match self.game.outcome() {
            Outcome::InProgress => Line::from(format!("Next: {}", self.game.current_player())),
            Outcome::Won(player, _) => Line::from(Span::styled(
                format!("Winner: {}", player),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Outcome::Draw => Line::from(Span::styled("Draw", Style::default().fg(ACCENT_COLOR))),
        }
    }

    fn cell_style(&self, index: usize, cell: Cell) -> Style {
        let mut style = match cell {
            Cell::X => Style::default().fg(Color::LightBlue),
            Cell::O => Style::default().fg(Color::LightMagenta),
            Cell::Empty => Style::default(),
        };
        if let Outcome::Won(_, line) = self.game.outcome() {
            if line.contains(&index) {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
        }
        if self.focused && self.game.cursor() == index {
            style = style.bg(FOCUS_COLOR).fg(Color::Black);
        }
        style
    }

    fn grid_lines(&self) -> Vec<Line<'static>> {
        let cells = self.game.board().cells;
        let mut lines = Vec::with_capacity(5);
        for row in 0..3 {
            if row > 0 {
                lines.push(Line::from(ROW_SEPARATOR));
            }
            let mut spans = Vec::with_capacity(5);
            for col in 0..3 {
                let index = row * 3 + col;
                if col > 0 {
                    spans.push(Span::raw("│"));
                }
                let cell = cells[index];
                spans.push(Span::styled(
                    format!(" {} ", cell.symbol()),
                    self.cell_style(index, cell),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = panel("Tic-Tac-Toe", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines = self.grid_lines();
        lines.push(Line::default());
        lines.push(self.status_line());

        let padding = inner.height.saturating_sub(lines.len() as u16) / 2;
        let mut padded = vec![Line::default(); padding as usize];
        padded.extend(lines);

        Paragraph::new(padded)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::super::panel::test_support::{contains, render_rows};
    use super::*;
    use crate::store::WidgetStore;

    fn rows(game: &TicTacToeState) -> Vec<String> {
        render_rows(24, 10, |area, buf| TicTacToeView::new(game, true).render(area, buf))
    }

    #[test]
    fn test_empty_board() {
        let game = TicTacToeState::load(WidgetStore::ephemeral());
        let rows = rows(&game);
        assert!(contains(&rows, "Tic-Tac-Toe"));
        assert!(contains(&rows, ROW_SEPARATOR));
        assert!(contains(&rows, "Next: X"));
    }

    #[test]
    fn test_marks_and_winner() {
        let mut game = TicTacToeState::load(WidgetStore::ephemeral());
        for index in [0, 3, 1, 4, 2] {
            game.play_move(index);
        }
        let rows = rows(&game);
        assert!(contains(&rows, " X │ X │ X "));
        assert!(contains(&rows, " O │ O │   "));
        assert!(contains(&rows, "Winner: X"));
    }

    #[test]
    fn test_draw() {
        let mut game = TicTacToeState::load(WidgetStore::ephemeral());
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.play_move(index);
        }
        assert!(contains(&rows(&game), "Draw"));
    }
}
