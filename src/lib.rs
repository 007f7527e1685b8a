//! TUI Bingo (workspace facade crate).
//!
//! Re-exports the member crates as `tui_bingo::{core,engine,input,term,types}`;
//! the implementation lives under `crates/`.

pub use tui_bingo_core as core;
pub use tui_bingo_engine as engine;
pub use tui_bingo_input as input;
pub use tui_bingo_term as term;
pub use tui_bingo_types as types;
