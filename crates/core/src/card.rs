//! Card module - 5x5 Bingo card and its generator
//!
//! A card is stored column-major: `columns[col][row]`. Column `c` holds five
//! distinct numbers from `15c + 1 ..= 15c + 15`; the center cell is free.
//! Cards are built once per session and never mutated. Marks live in the
//! game state, not on the card.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Cell, CARD_SIZE, COLUMN_SPAN, FREE_COL, FREE_ROW};

/// Why a set of columns is not a valid card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("center cell must be FREE")]
    CenterNotFree,
    #[error("FREE found at column {col}, row {row}; only the center may be free")]
    MisplacedFree { col: usize, row: usize },
    #[error("{value} at column {col}, row {row} is outside {min}..={max}")]
    OutOfRange {
        col: usize,
        row: usize,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("{value} appears twice in column {col}")]
    Duplicate { col: usize, value: u8 },
}

/// A player's Bingo card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    columns: [[Cell; CARD_SIZE]; CARD_SIZE],
}

impl Card {
    /// Build a card from explicit columns, checking every card invariant.
    pub fn from_columns(columns: [[Cell; CARD_SIZE]; CARD_SIZE]) -> Result<Self, CardError> {
        let card = Self { columns };
        card.validate()?;
        Ok(card)
    }

    /// Check the column ranges, duplicates and free-cell placement.
    pub fn validate(&self) -> Result<(), CardError> {
        if !self.columns[FREE_COL][FREE_ROW].is_free() {
            return Err(CardError::CenterNotFree);
        }

        for (col, cells) in self.columns.iter().enumerate() {
            let (min, max) = column_range(col);
            for (row, cell) in cells.iter().enumerate() {
                let value = match cell {
                    Cell::Free if (col, row) == (FREE_COL, FREE_ROW) => continue,
                    Cell::Free => return Err(CardError::MisplacedFree { col, row }),
                    Cell::Number(n) => *n,
                };
                if value < min || value > max {
                    return Err(CardError::OutOfRange {
                        col,
                        row,
                        value,
                        min,
                        max,
                    });
                }
                if cells[..row].contains(&Cell::Number(value)) {
                    return Err(CardError::Duplicate { col, value });
                }
            }
        }

        Ok(())
    }

    /// Cell at `(col, row)`
    ///
    /// Panics if either index is 5 or more.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.columns[col][row]
    }

    pub fn column(&self, col: usize) -> &[Cell; CARD_SIZE] {
        &self.columns[col]
    }

    pub fn row(&self, row: usize) -> [Cell; CARD_SIZE] {
        std::array::from_fn(|col| self.columns[col][row])
    }

    /// Position `(col, row)` of a number, if present
    pub fn position(&self, n: u8) -> Option<(usize, usize)> {
        let col = column_for(n)?;
        self.columns[col]
            .iter()
            .position(|&cell| cell == Cell::Number(n))
            .map(|row| (col, row))
    }

    pub fn contains(&self, n: u8) -> bool {
        self.position(n).is_some()
    }

    /// The 24 numbers on the card, column by column
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns
            .iter()
            .flat_map(|cells| cells.iter().filter_map(Cell::number))
    }
}

/// Inclusive number range for a column
pub fn column_range(col: usize) -> (u8, u8) {
    let min = col as u8 * COLUMN_SPAN + 1;
    (min, min + COLUMN_SPAN - 1)
}

fn column_for(n: u8) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let col = ((n - 1) / COLUMN_SPAN) as usize;
    (col < CARD_SIZE).then_some(col)
}

/// Generate a random card.
///
/// Each column is filled by rejection sampling: draw uniformly from the
/// column's 15-wide range, discard repeats, stop at five. The center is then
/// overwritten with [`Cell::Free`].
pub fn generate_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    let mut columns = [[Cell::Free; CARD_SIZE]; CARD_SIZE];

    for (col, cells) in columns.iter_mut().enumerate() {
        let (min, max) = column_range(col);
        let mut filled = 0;
        while filled < CARD_SIZE {
            let candidate = Cell::Number(rng.gen_range(min..=max));
            if !cells[..filled].contains(&candidate) {
                cells[filled] = candidate;
                filled += 1;
            }
        }
    }

    columns[FREE_COL][FREE_ROW] = Cell::Free;

    let card = Card { columns };
    assert!(
        card.validate().is_ok(),
        "generated card breaks card invariants: {card:?}"
    );
    card
}
