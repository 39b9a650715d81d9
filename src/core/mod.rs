//! Core application logic
//!
//! Owns the widget states, the tick scheduler and the store, and routes key
//! presses and due ticks to widgets. NO imports from frontend/ or rendering
//! code.

pub mod app_core;
pub mod input_result;

pub use app_core::{AppCore, WidgetId};
pub use input_result::InputResult;
