//! TUI Frontend (ratatui-based)
//!
//! Implements the Frontend trait with ratatui for drawing and crossterm for
//! terminal management. Each widget has a view module that reads its state
//! from `AppCore`.

pub mod app;
pub mod editors;
pub mod music;
pub mod panel;
pub mod scratchpad;
pub mod tic_tac_toe;
pub mod timer;
pub mod todo;
pub mod widget_traits;

pub use app::TuiFrontend;
