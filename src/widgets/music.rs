//! Music player shell.
//!
//! Holds transport and volume state only; nothing is ever decoded or played.

pub const MAX_VOLUME: u8 = 100;

/// Fixed position shown by the progress bar
pub const PROGRESS_PERCENT: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicPlayerState {
    playing: bool,
    volume: u8,
}

impl MusicPlayerState {
    pub fn new(volume: u8) -> Self {
        Self {
            playing: false,
            volume: volume.min(MAX_VOLUME),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Nudge the volume, clamped to `0..=100`
    pub fn adjust_volume(&mut self, delta: i16) {
        let volume = (self.volume as i16 + delta).clamp(0, MAX_VOLUME as i16);
        self.volume = volume as u8;
    }

    pub fn progress_percent(&self) -> u16 {
        PROGRESS_PERCENT
    }
}

impl Default for MusicPlayerState {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_play() {
        let mut player = MusicPlayerState::default();
        assert!(!player.is_playing());
        player.toggle_play();
        assert!(player.is_playing());
        player.toggle_play();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut player = MusicPlayerState::new(250);
        assert_eq!(player.volume(), 100);

        player.adjust_volume(-30);
        assert_eq!(player.volume(), 70);
        player.adjust_volume(-500);
        assert_eq!(player.volume(), 0);
        player.adjust_volume(101);
        assert_eq!(player.volume(), 100);

        player.set_volume(42);
        assert_eq!(player.volume(), 42);
    }
}
