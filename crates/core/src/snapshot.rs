//! Read model handed to the presentation layer.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::card::Card;
use crate::numbers::{NumberSet, POOL_CAPACITY};
use crate::types::{Cell, Outcome, Player, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub generation: u32,
    pub seed: u64,
    pub human: Option<Card>,
    pub opponent: Option<Card>,
    /// Chronological draw order.
    pub called: ArrayVec<u8, POOL_CAPACITY>,
    #[serde(skip)]
    pub called_set: NumberSet,
    pub marked: ArrayVec<u8, POOL_CAPACITY>,
    #[serde(skip)]
    pub marked_set: NumberSet,
    pub remaining: usize,
    pub claim_eligible: bool,
    pub false_claim: bool,
    pub outcome: Option<Outcome>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
        self.generation = 0;
        self.seed = 0;
        self.human = None;
        self.opponent = None;
        self.called.clear();
        self.called_set.clear();
        self.marked.clear();
        self.marked_set.clear();
        self.remaining = 0;
        self.claim_eligible = false;
        self.false_claim = false;
        self.outcome = None;
    }

    pub fn card(&self, player: Player) -> Option<&Card> {
        match player {
            Player::Human => self.human.as_ref(),
            Player::Opponent => self.opponent.as_ref(),
        }
    }

    pub fn last_called(&self) -> Option<u8> {
        self.called.last().copied()
    }

    /// Calls before the latest one, most recent first
    pub fn previous_calls(&self) -> impl Iterator<Item = u8> + '_ {
        let end = self.called.len().saturating_sub(1);
        self.called[..end].iter().rev().copied()
    }

    /// Whether `cell` shows as marked on `player`'s card
    pub fn is_marked(&self, player: Player, cell: Cell) -> bool {
        let set = match player {
            Player::Human => &self.marked_set,
            Player::Opponent => &self.called_set,
        };
        crate::pattern::is_covered(cell, set)
    }

    /// Whether `number` has been called but not yet marked by the human
    pub fn is_markable(&self, number: u8) -> bool {
        self.state == SessionState::Playing
            && self.called_set.contains(number)
            && !self.marked_set.contains(number)
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
            seed: 0,
            human: None,
            opponent: None,
            called: ArrayVec::new(),
            called_set: NumberSet::new(),
            marked: ArrayVec::new(),
            marked_set: NumberSet::new(),
            remaining: 0,
            claim_eligible: false,
            false_claim: false,
            outcome: None,
        }
    }
}
