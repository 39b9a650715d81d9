//! Input events as the event loop sees them.
//!
//! crossterm delivers presses, repeats and releases plus focus and mouse
//! events. The page only reacts to key presses, resizes and bracketed paste,
//! so everything else is filtered out here.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    Key(KeyPress),
    /// New terminal size as `(width, height)`
    Resize(u16, u16),
    /// Bracketed paste
    Paste(String),
    /// Input stream closed
    Quit,
}

impl FrontendEvent {
    /// Keep the crossterm events the page handles. Key releases are dropped;
    /// repeats count as presses.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key.into())),
            Event::Resize(width, height) => Some(Self::Resize(width, height)),
            Event::Paste(text) => Some(Self::Paste(text)),
            _ => None,
        }
    }
}
