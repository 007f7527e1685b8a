//! Win detection.
//!
//! A cell is covered when it is free or its number is in the marked set.
//! Lines are checked in a fixed order and the first complete one wins:
//! rows top to bottom, columns B to O, then the main and anti diagonals.
//! Callers rely on this order when several lines complete at once.

use crate::card::Card;
use crate::numbers::NumberSet;
use crate::types::{Cell, WinPattern, CARD_SIZE};

/// Every winning line, in priority order
pub const WIN_LINES: [WinPattern; 2 * CARD_SIZE + 2] = [
    WinPattern::Row(0),
    WinPattern::Row(1),
    WinPattern::Row(2),
    WinPattern::Row(3),
    WinPattern::Row(4),
    WinPattern::Column(0),
    WinPattern::Column(1),
    WinPattern::Column(2),
    WinPattern::Column(3),
    WinPattern::Column(4),
    WinPattern::MainDiagonal,
    WinPattern::AntiDiagonal,
];

pub fn is_covered(cell: Cell, marked: &NumberSet) -> bool {
    match cell {
        Cell::Free => true,
        Cell::Number(n) => marked.contains(n),
    }
}

/// Whether every cell of `line` is covered
pub fn line_complete(card: &Card, marked: &NumberSet, line: WinPattern) -> bool {
    line.cells()
        .iter()
        .all(|&(col, row)| is_covered(card.cell(col, row), marked))
}

/// First complete line on `card`, or `None`
pub fn find_winning_pattern(card: &Card, marked: &NumberSet) -> Option<WinPattern> {
    WIN_LINES
        .into_iter()
        .find(|&line| line_complete(card, marked, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{column_range, generate_card};
    use crate::rng::GameRng;
    use crate::types::{FREE_COL, FREE_ROW};
    use proptest::prelude::*;

    /// Card with column `c` = `15c+1 ..= 15c+5` top to bottom.
    fn fixed_card() -> Card {
        let columns = std::array::from_fn(|col| {
            let (min, _) = column_range(col);
            std::array::from_fn(|row| {
                if (col, row) == (FREE_COL, FREE_ROW) {
                    Cell::Free
                } else {
                    Cell::Number(min + row as u8)
                }
            })
        });
        Card::from_columns(columns).unwrap()
    }

    fn cover(card: &Card, line: WinPattern, marked: &mut NumberSet) {
        for (col, row) in line.cells() {
            if let Cell::Number(n) = card.cell(col, row) {
                marked.insert(n);
            }
        }
    }

    #[test]
    fn test_empty_marks_no_win() {
        let card = fixed_card();
        assert_eq!(find_winning_pattern(&card, &NumberSet::new()), None);
    }

    #[test]
    fn test_each_line_detected_alone() {
        let card = fixed_card();
        for line in WIN_LINES {
            let mut marked = NumberSet::new();
            cover(&card, line, &mut marked);
            assert_eq!(find_winning_pattern(&card, &marked), Some(line));
        }
    }

    #[test]
    fn test_free_cell_counts_as_covered() {
        let card = fixed_card();
        // Row 3 (index 2) crosses the free cell: four numbers suffice.
        let marked: NumberSet = [3, 18, 48, 63].into_iter().collect();
        assert_eq!(find_winning_pattern(&card, &marked), Some(WinPattern::Row(2)));
    }

    #[test]
    fn test_incomplete_line_not_a_win() {
        let card = fixed_card();
        let marked: NumberSet = [1, 16, 31, 46].into_iter().collect();
        assert_eq!(find_winning_pattern(&card, &marked), None);
    }

    #[test]
    fn test_row_beats_column() {
        let card = fixed_card();
        let mut marked = NumberSet::new();
        cover(&card, WinPattern::Column(0), &mut marked);
        cover(&card, WinPattern::Row(4), &mut marked);
        assert_eq!(find_winning_pattern(&card, &marked), Some(WinPattern::Row(4)));
    }

    #[test]
    fn test_column_beats_diagonal() {
        let card = fixed_card();
        let mut marked = NumberSet::new();
        cover(&card, WinPattern::MainDiagonal, &mut marked);
        cover(&card, WinPattern::Column(3), &mut marked);
        assert_eq!(
            find_winning_pattern(&card, &marked),
            Some(WinPattern::Column(3))
        );
    }

    #[test]
    fn test_row_beats_diagonal() {
        let card = fixed_card();
        let mut marked = NumberSet::new();
        cover(&card, WinPattern::AntiDiagonal, &mut marked);
        cover(&card, WinPattern::Row(1), &mut marked);
        assert_eq!(find_winning_pattern(&card, &marked), Some(WinPattern::Row(1)));
    }

    #[test]
    fn test_main_diagonal_beats_anti_diagonal() {
        let card = fixed_card();
        let mut marked = NumberSet::new();
        cover(&card, WinPattern::AntiDiagonal, &mut marked);
        cover(&card, WinPattern::MainDiagonal, &mut marked);
        assert_eq!(
            find_winning_pattern(&card, &marked),
            Some(WinPattern::MainDiagonal)
        );
    }

    #[test]
    fn test_lowest_row_index_wins() {
        let card = fixed_card();
        let mut marked = NumberSet::new();
        cover(&card, WinPattern::Row(3), &mut marked);
        cover(&card, WinPattern::Row(0), &mut marked);
        assert_eq!(find_winning_pattern(&card, &marked), Some(WinPattern::Row(0)));
    }

    proptest! {
        #[test]
        fn full_coverage_always_reports_row_one(seed in any::<u64>()) {
            let card = generate_card(&mut GameRng::new(seed));
            let marked: NumberSet = card.numbers().collect();
            prop_assert_eq!(find_winning_pattern(&card, &marked), Some(WinPattern::Row(0)));
        }

        #[test]
        fn reported_line_is_complete(seed in any::<u64>(), picks in proptest::collection::vec(1u8..=75, 0..60)) {
            let card = generate_card(&mut GameRng::new(seed));
            let marked: NumberSet = picks.into_iter().collect();
            match find_winning_pattern(&card, &marked) {
                Some(line) => prop_assert!(line_complete(&card, &marked, line)),
                None => prop_assert!(WIN_LINES.iter().all(|&l| !line_complete(&card, &marked, l))),
            }
        }
    }
}
