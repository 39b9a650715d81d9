//! Frontend abstraction layer
//!
//! The `Frontend` trait separates drawing and terminal management from the
//! core. The only implementation is the ratatui TUI.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::{FrontendEvent, KeyPress};
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Draw the whole page from the current core state
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;

    /// Current drawing area size as `(width, height)`
    fn size(&self) -> (u16, u16);
}
