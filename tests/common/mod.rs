#![allow(dead_code)]

use tui_bingo::core::{column_range, Card, Deal};
use tui_bingo::types::{Cell, FREE_COL, FREE_ROW};

/// Column `c` holds `15c + 1 + offset ..= 15c + 5 + offset`, top to bottom.
pub fn card_with_offset(offset: u8) -> Card {
    let columns = std::array::from_fn(|col| {
        let (min, _) = column_range(col);
        std::array::from_fn(|row| {
            if (col, row) == (FREE_COL, FREE_ROW) {
                Cell::Free
            } else {
                Cell::Number(min + offset + row as u8)
            }
        })
    });
    Card::from_columns(columns).expect("valid card")
}

/// Human on the low numbers of each column, computer on the high ones.
/// The two cards share no numbers.
pub fn disjoint_deal() -> Deal {
    Deal {
        human: card_with_offset(0),
        opponent: card_with_offset(10),
    }
}

/// Top row of the human card in [`disjoint_deal`]: 1, 16, 31, 46, 61.
pub const HUMAN_TOP_ROW: [u8; 5] = [1, 16, 31, 46, 61];

/// Top row of the computer card in [`disjoint_deal`].
pub const OPPONENT_TOP_ROW: [u8; 5] = [11, 26, 41, 56, 71];
