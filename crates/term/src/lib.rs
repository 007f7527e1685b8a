//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It avoids widget/layout
//! libraries and instead renders into a framebuffer that is diffed and
//! flushed to the terminal.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`TerminalRenderer`] owns the raw-mode terminal and writes only changed runs

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_bingo_core as core;
pub use tui_bingo_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, MIN_CELL_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
