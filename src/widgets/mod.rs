//! Widget state structs (rendering-agnostic)
//!
//! Each widget owns its state and the methods that change it. Nothing here
//! knows about ratatui; the TUI frontend reads these structs to draw them.

pub mod music;
pub mod scratchpad;
pub mod tic_tac_toe;
pub mod timer;
pub mod todo;

pub use music::MusicPlayerState;
pub use scratchpad::ScratchpadState;
pub use tic_tac_toe::TicTacToeState;
pub use timer::{TickOutcome, TimerKind, TimerPhase, TimerState};
pub use todo::TodoListState;
