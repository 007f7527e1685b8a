//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (core engine, terminal rendering, input mapping).
//!
//! # Card Dimensions
//!
//! A Bingo card is a 5x5 grid:
//!
//! - **Columns**: labeled B, I, N, G, O (indexed 0-4)
//! - **Rows**: indexed 0-4, top to bottom
//! - **Free cell**: column 2 (N), row 2
//!
//! Column `c` holds numbers from `15c + 1` through `15c + 15`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DRAW_INTERVAL_MS` | 3000 | Cadence of the number draw |
//! | `FALSE_CLAIM_MS` | 3000 | How long a false BINGO claim stays flagged |
//! | `FRAME_MS` | 100 | Terminal redraw / input poll interval |
//!
//! # Examples
//!
//! ```
//! use tui_bingo_types::{column_letter, Cell, WinPattern, CARD_SIZE, MAX_NUMBER};
//!
//! assert_eq!(CARD_SIZE, 5);
//! assert_eq!(MAX_NUMBER, 75);
//!
//! assert_eq!(column_letter(Cell::Number(7)), 'B');
//! assert_eq!(column_letter(Cell::Number(75)), 'O');
//! assert_eq!(column_letter(Cell::Free), 'N');
//!
//! assert_eq!(WinPattern::Row(0).to_string(), "Row 1");
//! assert_eq!(WinPattern::Column(3).to_string(), "Column G");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card width and height in cells
pub const CARD_SIZE: usize = 5;

/// Number of distinct values per column range
pub const COLUMN_SPAN: u8 = 15;

/// Highest number in the pool (pool is `1..=MAX_NUMBER`)
pub const MAX_NUMBER: u8 = 75;

/// Column index of the free cell
pub const FREE_COL: usize = 2;

/// Row index of the free cell
pub const FREE_ROW: usize = 2;

/// Column labels, left to right
pub const COLUMN_LETTERS: [char; CARD_SIZE] = ['B', 'I', 'N', 'G', 'O'];

/// Default draw cadence (3 seconds per called number)
pub const DRAW_INTERVAL_MS: u64 = 3000;

/// Default lifetime of the false-claim flag
pub const FALSE_CLAIM_MS: u64 = 3000;

/// Terminal frame interval in milliseconds
pub const FRAME_MS: u64 = 100;

/// Number of previous calls the history strip shows at once
pub const HISTORY_WINDOW: usize = 8;


/// A single card cell
///
/// - `Number(n)`: a value in `1..=75`
/// - `Free`: the center cell, always covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Free,
    Number(u8),
}

impl Cell {
    /// The numeric value, or `None` for the free cell
    pub fn number(&self) -> Option<u8> {
        match self {
            Cell::Free => None,
            Cell::Number(n) => Some(*n),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Free => f.write_str("FREE"),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Column letter for a called number (B, I, N, G or O)
///
/// The free cell sits in the N column.
pub fn column_letter(cell: Cell) -> char {
    match cell {
        Cell::Free => COLUMN_LETTERS[FREE_COL],
        Cell::Number(n) => {
            let index = (n.saturating_sub(1) / COLUMN_SPAN) as usize;
            COLUMN_LETTERS[index.min(CARD_SIZE - 1)]
        }
    }
}

/// Lifecycle state of the single live session
///
/// `Idle` → `Playing` ⇄ `Paused` → `Over`. `Over` is left only by a new start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Paused,
    Over,
}

/// One of the two card holders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Opponent,
}

/// Who won a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Opponent,
    Draw,
}

impl Winner {
    /// Game-over headline
    pub fn message(&self) -> &'static str {
        match self {
            Winner::Human => "Congratulations! You've won!",
            Winner::Opponent => "The Computer has won!",
            Winner::Draw => "It's a draw!",
        }
    }
}

/// A completed line on a card
///
/// Indices are zero-based; `Display` renders the one-based / lettered
/// descriptor shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinPattern {
    /// Row index 0-4, top to bottom
    Row(u8),
    /// Column index 0-4, B to O
    Column(u8),
    /// Top-left to bottom-right
    MainDiagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl WinPattern {
    /// The `(col, row)` cells making up this line
    ///
    /// Indices past the grid are clamped to the last row or column.
    pub fn cells(&self) -> [(usize, usize); CARD_SIZE] {
        let mut out = [(0, 0); CARD_SIZE];
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = match *self {
                WinPattern::Row(row) => (i, clamp_index(row)),
                WinPattern::Column(col) => (clamp_index(col), i),
                WinPattern::MainDiagonal => (i, i),
                WinPattern::AntiDiagonal => (CARD_SIZE - 1 - i, i),
            };
        }
        out
    }
}

impl fmt::Display for WinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinPattern::Row(row) => write!(f, "Row {}", u16::from(*row) + 1),
            WinPattern::Column(col) => {
                let letter = COLUMN_LETTERS[clamp_index(*col)];
                write!(f, "Column {letter}")
            }
            WinPattern::MainDiagonal => f.write_str("Diagonal (Top-left to Bottom-right)"),
            WinPattern::AntiDiagonal => f.write_str("Diagonal (Top-right to Bottom-left)"),
        }
    }
}

fn clamp_index(index: u8) -> usize {
    (index as usize).min(CARD_SIZE - 1)
}

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Winner,
    /// `None` only for a draw
    pub pattern: Option<WinPattern>,
}

impl Outcome {
    pub fn won(winner: Winner, pattern: WinPattern) -> Self {
        Self {
            winner,
            pattern: Some(pattern),
        }
    }

    /// The pool ran dry before anyone completed a line.
    pub fn draw() -> Self {
        Self {
            winner: Winner::Draw,
            pattern: None,
        }
    }

    /// Pattern descriptor, or the exhaustion reason for a draw
    pub fn description(&self) -> String {
        match self.pattern {
            Some(pattern) => pattern.to_string(),
            None => "No more numbers to call".to_string(),
        }
    }
}

/// Commands the presentation layer can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Begin a fresh session (valid from any state)
    Start,
    /// Suspend the draw loop
    Pause,
    /// Continue after a pause
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    /// Mark a called number on the human card
    Mark(u8),
    /// Claim BINGO
    Claim,
}
