//! Engine module - runs a Bingo session in real time
//!
//! The core crate is timer-free; this crate supplies the clock. A
//! [`Session`] wraps the game state behind a mutex and drives it from a
//! tokio runtime:
//!
//! - **Draw scheduler**: one task per playing stretch, calling a number every
//!   `draw_interval` (3s by default) until the game ends or is paused
//! - **False-claim expiry**: clears the false-claim flag after
//!   `false_claim_duration`
//! - **Cancellation**: pause, game over and restart abort the running draw
//!   task and bump an epoch; ticks from an older epoch are dropped
//!
//! # Configuration
//!
//! See [`EngineConfig::from_env`] for the environment variables.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_bingo_engine::{EngineConfig, Session};
//! use tui_bingo_types::SessionState;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let config = EngineConfig::default().with_seed(7);
//! let mut session = Session::new(config).unwrap();
//! session.start();
//!
//! tokio::time::sleep(Duration::from_millis(3100)).await;
//! let snap = session.snapshot();
//! assert_eq!(snap.state, SessionState::Playing);
//! assert_eq!(snap.called.len(), 1);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use tui_bingo_core as core;
pub use tui_bingo_types as types;

pub use config::EngineConfig;
pub use error::EngineError;
pub use session::Session;
