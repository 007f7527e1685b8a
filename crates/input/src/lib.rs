//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Marking
//! goes through a [`CardCursor`]: the arrow keys move a highlight over the
//! human card and Enter/Space marks whatever number sits under it.

pub mod handler;
pub mod map;

pub use tui_bingo_core as core;
pub use tui_bingo_types as types;

pub use handler::{CardCursor, CursorMove};
pub use map::{handle_key_event, should_quit, KeyCommand};
