//! Card cursor for terminal marking.
//!
//! Terminals give no pointer, so the human card gets a cursor. Moves are
//! clamped to the grid; marking resolves the cell under the cursor into a
//! [`GameAction::Mark`].

use crate::core::Card;
use crate::types::{Cell, GameAction, CARD_SIZE, FREE_COL, FREE_ROW};

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

/// Cursor position on the human card, `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCursor {
    col: usize,
    row: usize,
}

impl Default for CardCursor {
    /// Starts on the free cell.
    fn default() -> Self {
        Self {
            col: FREE_COL,
            row: FREE_ROW,
        }
    }
}

impl CardCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(col: usize, row: usize) -> Self {
        Self {
            col: col.min(CARD_SIZE - 1),
            row: row.min(CARD_SIZE - 1),
        }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn position(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Step one cell; stops at the edges. Returns whether the cursor moved.
    pub fn apply(&mut self, step: CursorMove) -> bool {
        let before = self.position();
        match step {
            CursorMove::Left => self.col = self.col.saturating_sub(1),
            CursorMove::Right => self.col = (self.col + 1).min(CARD_SIZE - 1),
            CursorMove::Up => self.row = self.row.saturating_sub(1),
            CursorMove::Down => self.row = (self.row + 1).min(CARD_SIZE - 1),
        }
        self.position() != before
    }

    /// The mark command for the cell under the cursor.
    ///
    /// `None` on the free cell. Whether the number is markable is the game
    /// state's call.
    pub fn mark_action(&self, card: &Card) -> Option<GameAction> {
        match card.cell(self.col, self.row) {
            Cell::Free => None,
            Cell::Number(n) => Some(GameAction::Mark(n)),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
