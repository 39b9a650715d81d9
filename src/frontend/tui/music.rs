//! Music player panel: transport button, track progress and volume.

use super::panel::{panel, ACCENT_COLOR, FOCUS_COLOR};
use crate::widgets::MusicPlayerState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols,
    widgets::{Gauge, LineGauge, Paragraph, Widget},
};

pub struct MusicView<'a> {
    player: &'a MusicPlayerState,
    focused: bool,
}

impl<'a> MusicView<'a> {
    pub fn new(player: &'a MusicPlayerState, focused: bool) -> Self {
        Self { player, focused }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = panel("Music Player", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let [track_area, button_area, progress_area, volume_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(inner);

        let track = if self.player.is_playing() {
            "Playing"
        } else {
            "Stopped"
        };
        Paragraph::new(track)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .render(track_area, buf);

        let button = if self.player.is_playing() {
            "[Pause]"
        } else {
            "[Play]"
        };
        Paragraph::new(button)
            .alignment(Alignment::Center)
            .style(Style::default().fg(FOCUS_COLOR))
            .render(button_area, buf);

        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT_COLOR).bg(Color::DarkGray))
            .percent(self.player.progress_percent())
            .label(format!("{}%", self.player.progress_percent()))
            .render(progress_area, buf);

        LineGauge::default()
            .filled_style(Style::default().fg(Color::Green))
            .line_set(symbols::line::THICK)
            .ratio(f64::from(self.player.volume()) / 100.0)
            .label(format!("Vol {:>3}", self.player.volume()))
            .render(volume_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::super::panel::test_support::{contains, render_rows};
    use super::*;

    fn rows(player: &MusicPlayerState) -> Vec<String> {
        render_rows(30, 8, |area, buf| MusicView::new(player, true).render(area, buf))
    }

    #[test]
    fn test_stopped_player() {
        let player = MusicPlayerState::default();
        let rows = rows(&player);
        assert!(contains(&rows, "Music Player"));
        assert!(contains(&rows, "[Play]"));
        assert!(contains(&rows, "50%"));
        assert!(contains(&rows, "Vol  50"));
    }

    #[test]
    fn test_playing_player_with_volume() {
        let mut player = MusicPlayerState::new(80);
        player.toggle_play();
        let rows = rows(&player);
        assert!(contains(&rows, "[Pause]"));
        assert!(contains(&rows, "Vol  80"));
    }
}
