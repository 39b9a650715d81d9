//! Audible alert for Pomodoro expiry.
//!
//! Backed by rodio when the `sound` feature is enabled; otherwise a silent
//! stand-in with the same interface. Every playback failure is logged and
//! skipped.

use std::path::PathBuf;

#[cfg(feature = "sound")]
mod backend {
    use anyhow::Result;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;
    use tracing::{debug, warn};

    pub struct Output {
        _stream: OutputStream,
        stream_handle: OutputStreamHandle,
    }

    impl Output {
        pub fn open() -> Result<Self> {
            let (stream, stream_handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                stream_handle,
            })
        }

        pub fn play(&self, path: &Path, volume: f32) -> Result<()> {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    warn!("Failed to open sound file {:?}: {}", path, e);
                    return Ok(());
                }
            };

            let source = match Decoder::new(BufReader::new(file)) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Failed to decode sound file {:?}: {}", path, e);
                    return Ok(());
                }
            };

            let sink = Sink::try_new(&self.stream_handle)?;
            sink.set_volume(volume);
            sink.append(source);
            sink.detach(); // Play in background

            debug!("Playing sound: {:?} at volume {}", path, volume);
            Ok(())
        }
    }
}

#[cfg(not(feature = "sound"))]
mod backend {
    use anyhow::Result;
    use std::path::Path;

    pub struct Output;

    impl Output {
        pub fn open() -> Result<Self> {
            Ok(Self)
        }

        pub fn play(&self, path: &Path, _volume: f32) -> Result<()> {
            tracing::debug!("Sound support disabled, skipping {:?}", path);
            Ok(())
        }
    }
}

/// Plays the configured expiry sound
pub struct AlertPlayer {
    output: Option<backend::Output>,
    sound: Option<PathBuf>,
    volume: f32,
}

impl AlertPlayer {
    /// Create a player. The audio device is only opened when there is
    /// something to play, and a missing device leaves the player silent.
    pub fn new(enabled: bool, sound: Option<PathBuf>, volume: f32) -> Self {
        let sound = if enabled { sound } else { None };
        let output = match &sound {
            Some(_) => match backend::Output::open() {
                Ok(output) => Some(output),
                Err(e) => {
                    tracing::warn!("No audio output available, alerts are silent: {:#}", e);
                    None
                }
            },
            None => None,
        };

        Self {
            output,
            sound,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Player that never makes a sound
    pub fn silent() -> Self {
        Self::new(false, None, 0.0)
    }

    pub fn is_audible(&self) -> bool {
        self.output.is_some() && self.sound.is_some()
    }

    /// Play the expiry sound, if any
    pub fn play_expiry(&self) {
        if let (Some(output), Some(path)) = (&self.output, &self.sound) {
            if let Err(e) = output.play(path, self.volume) {
                tracing::warn!("Failed to play expiry sound: {:#}", e);
            }
        }
    }
}
