//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the Bingo rules and the session state machine.
//! It has **no dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical cards and draws
//! - **Testable**: Every transition can be driven step by step
//! - **Portable**: Any scheduler or frontend can drive it
//! - **Allocation-free**: Pool, called sequence and marks are fixed-capacity
//!
//! # Module Structure
//!
//! - [`card`]: 5x5 card, validation, and the rejection-sampling generator
//! - [`pattern`]: win detection with a fixed line priority
//! - [`numbers`]: the draw pool and 1..=75 number sets
//! - [`game_state`]: session lifecycle, draws, marks and claims
//! - [`snapshot`]: read model for the presentation layer
//! - [`rng`]: seeded ChaCha RNG
//!
//! # Game Rules
//!
//! - **Cards**: column B holds 1-15, I 16-30, N 31-45, G 46-60, O 61-75;
//!   the center is free
//! - **Draws**: one number per period, uniformly from the remaining pool
//! - **Opponent**: every called number counts as marked on its card, and it
//!   wins as soon as a draw completes a line
//! - **Human**: marks called numbers by hand, then claims BINGO; a claim
//!   without a complete line is flagged as false and changes nothing else
//! - **Lines**: rows, then columns, then the two diagonals
//!
//! # Example
//!
//! ```
//! use tui_bingo_core::{ClaimOutcome, GameState};
//! use tui_bingo_types::{Player, SessionState};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.state(), SessionState::Playing);
//!
//! // Call the human's first row and mark it.
//! let row: Vec<u8> = game
//!     .card(Player::Human)
//!     .unwrap()
//!     .row(0)
//!     .iter()
//!     .filter_map(|cell| cell.number())
//!     .collect();
//! for &n in &row {
//!     game.call_number(n);
//!     game.mark(n);
//! }
//!
//! assert!(game.claim_eligible());
//! assert!(matches!(game.claim(), ClaimOutcome::Won(_)));
//! assert_eq!(game.state(), SessionState::Over);
//! ```

pub mod card;
pub mod game_state;
pub mod numbers;
pub mod pattern;
pub mod rng;
pub mod snapshot;

pub use tui_bingo_types as types;

// Re-export commonly used types for convenience
pub use card::{column_range, generate_card, Card, CardError};
pub use game_state::{ClaimOutcome, Deal, DrawEvent, GameState};
pub use numbers::{NumberSet, Pool, POOL_CAPACITY};
pub use pattern::{find_winning_pattern, line_complete, WIN_LINES};
pub use rng::GameRng;
pub use snapshot::GameSnapshot;
