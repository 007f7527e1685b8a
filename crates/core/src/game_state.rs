//! Game state module - the session state machine
//!
//! `GameState` owns everything a session mutates: the pool, the called
//! sequence, the human's marks, both cards and the outcome. The presentation
//! layer reads it through [`GameSnapshot`](crate::snapshot::GameSnapshot) and
//! drives it with commands.
//!
//! Timing is not handled here. A scheduler calls [`GameState::draw_tick`]
//! once per draw period and [`GameState::clear_false_claim`] when a false
//! claim expires; see the engine crate.
//!
//! Invalid commands (marking while paused, marking an uncalled number,
//! claiming after the game ended) are ignored and report `false` /
//! an ignored outcome. They never error.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::card::{generate_card, Card};
use crate::numbers::{NumberSet, Pool, POOL_CAPACITY};
use crate::pattern::find_winning_pattern;
use crate::rng::GameRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What a single draw step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEvent {
    /// Session is not playing; nothing drawn.
    Skipped,
    /// Number called, no winner yet.
    Called(u8),
    /// Number called and it completed a line on the opponent's card.
    OpponentWon { number: u8, pattern: WinPattern },
    /// Pool was empty; the session ended in a draw.
    Exhausted,
}

/// Result of a BINGO claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No live session to claim in.
    Ignored,
    /// The human card has a complete line; the human wins.
    Won(WinPattern),
    /// No complete line. The false-claim flag is raised until
    /// [`GameState::clear_false_claim`] is called with this token.
    FalseClaim { token: u32 },
}

/// The two cards dealt for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deal {
    pub human: Card,
    pub opponent: Card,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    rng: GameRng,
    state: SessionState,
    /// Monotonic session id (increments on every start).
    generation: u32,
    deal: Option<Deal>,
    pool: Pool,
    /// Draw order.
    called: ArrayVec<u8, POOL_CAPACITY>,
    called_set: NumberSet,
    /// Mark order.
    marked: ArrayVec<u8, POOL_CAPACITY>,
    marked_set: NumberSet,
    claim_eligible: bool,
    false_claim: bool,
    /// Monotonic id of the latest false claim; never reset so stale expiries never match.
    claim_token: u32,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Create an idle game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    fn with_rng(rng: GameRng) -> Self {
        Self {
            rng,
            state: SessionState::Idle,
            generation: 0,
            deal: None,
            pool: Pool::new(),
            called: ArrayVec::new(),
            called_set: NumberSet::new(),
            marked: ArrayVec::new(),
            marked_set: NumberSet::new(),
            claim_eligible: false,
            false_claim: false,
            claim_token: 0,
            outcome: None,
        }
    }

    /// Start a fresh session with newly generated cards.
    ///
    /// Valid from any state. The human card is generated first, then the
    /// opponent's.
    pub fn start(&mut self) {
        let human = generate_card(&mut self.rng);
        let opponent = generate_card(&mut self.rng);
        self.start_with_deal(Deal { human, opponent });
    }

    /// Start a fresh session with the given cards.
    pub fn start_with_deal(&mut self, deal: Deal) {
        self.generation = self.generation.wrapping_add(1);
        self.deal = Some(deal);
        self.pool.reset();
        self.called.clear();
        self.called_set.clear();
        self.marked.clear();
        self.marked_set.clear();
        self.claim_eligible = false;
        self.false_claim = false;
        self.outcome = None;
        self.state = SessionState::Playing;

        info!("session {} started", self.generation);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn deal(&self) -> Option<&Deal> {
        self.deal.as_ref()
    }

    pub fn card(&self, player: Player) -> Option<&Card> {
        self.deal.as_ref().map(|deal| match player {
            Player::Human => &deal.human,
            Player::Opponent => &deal.opponent,
        })
    }

    pub fn called(&self) -> &[u8] {
        &self.called
    }

    pub fn last_called(&self) -> Option<u8> {
        self.called.last().copied()
    }

    pub fn marked(&self) -> &[u8] {
        &self.marked
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn claim_eligible(&self) -> bool {
        self.claim_eligible
    }

    pub fn false_claim(&self) -> bool {
        self.false_claim
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Suspend the draw loop. Only valid while playing.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.state = SessionState::Paused;
        debug!("session {} paused", self.generation);
        true
    }

    /// Continue after a pause. Only valid while paused.
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Playing;
        debug!("session {} resumed", self.generation);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    /// One draw-scheduler step.
    ///
    /// Draws a uniformly random number from the pool, appends it to the
    /// called sequence and checks the opponent card against the full called
    /// sequence. An empty pool ends the session in a draw.
    pub fn draw_tick(&mut self) -> DrawEvent {
        if !self.is_playing() {
            return DrawEvent::Skipped;
        }
        match self.pool.draw(&mut self.rng) {
            Some(number) => self.record_call(number),
            None => {
                self.end_game(Outcome::draw());
                DrawEvent::Exhausted
            }
        }
    }

    /// Call a specific number out of the pool.
    ///
    /// Follows the same path as [`GameState::draw_tick`], including the
    /// opponent win check. Skipped if not playing or the number is not in
    /// the pool.
    pub fn call_number(&mut self, number: u8) -> DrawEvent {
        if !self.is_playing() || !self.pool.take(number) {
            return DrawEvent::Skipped;
        }
        self.record_call(number)
    }

    fn record_call(&mut self, number: u8) -> DrawEvent {
        self.called.push(number);
        self.called_set.insert(number);
        debug!(
            "called {}-{} ({} left)",
            column_letter(Cell::Number(number)),
            number,
            self.pool.len()
        );

        let opponent_line = self
            .card(Player::Opponent)
            .and_then(|card| find_winning_pattern(card, &self.called_set));

        match opponent_line {
            Some(pattern) => {
                self.end_game(Outcome::won(Winner::Opponent, pattern));
                DrawEvent::OpponentWon { number, pattern }
            }
            None => DrawEvent::Called(number),
        }
    }

    /// Mark a called number on the human card.
    ///
    /// Accepted only while playing, for a number that has been called and is
    /// not marked yet. Raises the claim-eligible flag when the marks complete
    /// a line. Returns whether the mark was accepted.
    pub fn mark(&mut self, number: u8) -> bool {
        if !self.is_playing()
            || !self.called_set.contains(number)
            || self.marked_set.contains(number)
        {
            return false;
        }

        self.marked.push(number);
        self.marked_set.insert(number);

        let line = self
            .card(Player::Human)
            .and_then(|card| find_winning_pattern(card, &self.marked_set));
        self.claim_eligible = line.is_some();

        debug!("marked {number}; claim eligible: {}", self.claim_eligible);
        true
    }

    /// Claim BINGO for the human.
    ///
    /// Accepted while playing or paused. The marks are re-checked; a complete
    /// line wins, otherwise the claim is false and only raises the transient
    /// false-claim flag.
    pub fn claim(&mut self) -> ClaimOutcome {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return ClaimOutcome::Ignored;
        }

        let line = self
            .card(Player::Human)
            .and_then(|card| find_winning_pattern(card, &self.marked_set));

        match line {
            Some(pattern) => {
                self.end_game(Outcome::won(Winner::Human, pattern));
                ClaimOutcome::Won(pattern)
            }
            None => {
                self.claim_token = self.claim_token.wrapping_add(1);
                self.false_claim = true;
                info!("false claim in session {}", self.generation);
                ClaimOutcome::FalseClaim {
                    token: self.claim_token,
                }
            }
        }
    }

    /// Clear the false-claim flag raised by the claim that returned `token`.
    ///
    /// A newer false claim replaces the token, so an older expiry is a no-op.
    pub fn clear_false_claim(&mut self, token: u32) -> bool {
        if !self.false_claim || token != self.claim_token {
            return false;
        }
        self.false_claim = false;
        true
    }

    fn end_game(&mut self, outcome: Outcome) {
        self.state = SessionState::Over;
        self.false_claim = false;
        self.outcome = Some(outcome);
        info!(
            "session {} over: {:?} ({})",
            self.generation,
            outcome.winner,
            outcome.description()
        );
    }

    /// Whether `cell` counts as covered on `player`'s card
    ///
    /// The human's cells are covered by marks, the opponent's by the called
    /// sequence. Free cells are always covered.
    pub fn is_covered(&self, player: Player, cell: Cell) -> bool {
        let set = match player {
            Player::Human => &self.marked_set,
            Player::Opponent => &self.called_set,
        };
        crate::pattern::is_covered(cell, set)
    }

    /// Apply a command from the presentation layer
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Mark(number) => self.mark(number),
            GameAction::Claim => !matches!(self.claim(), ClaimOutcome::Ignored),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.state = self.state;
        out.generation = self.generation;
        out.seed = self.rng.seed();
        out.human = self.deal.map(|deal| deal.human);
        out.opponent = self.deal.map(|deal| deal.opponent);
        out.called.clone_from(&self.called);
        out.called_set = self.called_set;
        out.marked.clone_from(&self.marked);
        out.marked_set = self.marked_set;
        out.remaining = self.pool.len();
        out.claim_eligible = self.claim_eligible;
        out.false_claim = self.false_claim;
        out.outcome = self.outcome;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::column_range;

    /// Column `c` = `15c+1 ..= 15c+5`, top to bottom.
    fn low_card() -> Card {
        card_with_offset(0)
    }

    /// Column `c` = `15c+11 ..= 15c+15`, disjoint from `low_card`.
    fn high_card() -> Card {
        card_with_offset(10)
    }

    fn card_with_offset(offset: u8) -> Card {
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
        Card::from_columns(columns).unwrap()
    }

    fn scripted_game() -> GameState {
        let mut state = GameState::new(12345);
        state.start_with_deal(Deal {
            human: low_card(),
            opponent: high_card(),
        });
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.state, SessionState::Idle);
        assert_eq!(state.generation, 0);
        assert!(state.deal.is_none());
        assert!(state.called.is_empty());
        assert!(state.marked.is_empty());
        assert!(!state.claim_eligible);
        assert!(!state.false_claim);
        assert!(state.outcome.is_none());
        assert_eq!(state.pool.len(), 75);
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();

        assert_eq!(state.state, SessionState::Playing);
        assert_eq!(state.generation, 1);
        let deal = state.deal.unwrap();
        assert!(deal.human.validate().is_ok());
        assert!(deal.opponent.validate().is_ok());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(12345);
        state.start();
        let first_deal = state.deal.unwrap();

        for _ in 0..10 {
            state.draw_tick();
        }
        let first = state.called[0];
        state.mark(first);
        state.claim();

        state.start();
        assert_eq!(state.generation, 2);
        assert_eq!(state.state, SessionState::Playing);
        assert!(state.called.is_empty());
        assert!(state.called_set.is_empty());
        assert!(state.marked.is_empty());
        assert!(state.marked_set.is_empty());
        assert_eq!(state.pool.len(), 75);
        assert!(!state.claim_eligible);
        assert!(!state.false_claim);
        assert!(state.outcome.is_none());
        assert_ne!(state.deal.unwrap(), first_deal);
    }

    #[test]
    fn test_start_from_over() {
        let mut state = scripted_game();
        state.pool.clear();
        assert_eq!(state.draw_tick(), DrawEvent::Exhausted);
        assert_eq!(state.state, SessionState::Over);

        state.start();
        assert_eq!(state.state, SessionState::Playing);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(777);
        let mut b = GameState::new(777);
        a.start();
        b.start();
        for _ in 0..20 {
            assert_eq!(a.draw_tick(), b.draw_tick());
        }
        assert_eq!(a.deal, b.deal);
    }

    #[test]
    fn test_draw_tick_appends_called() {
        let mut state = GameState::new(12345);
        state.start();

        let DrawEvent::Called(n) = state.draw_tick() else {
            panic!("first draw cannot end the game");
        };
        assert_eq!(state.called.as_slice(), &[n]);
        assert!(state.called_set.contains(n));
        assert!(!state.pool.contains(n));
        assert_eq!(state.pool.len(), 74);
    }

    #[test]
    fn test_draw_tick_skipped_unless_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.draw_tick(), DrawEvent::Skipped);

        state.start();
        state.pause();
        assert_eq!(state.draw_tick(), DrawEvent::Skipped);
        assert!(state.called.is_empty());
        assert_eq!(state.pool.len(), 75);
    }

    #[test]
    fn test_opponent_wins_on_draw() {
        let mut state = scripted_game();
        // Opponent row 1 (index 0): 11, 26, 41, 56, 71.
        for n in [11, 26, 41, 56] {
            assert_eq!(state.call_number(n), DrawEvent::Called(n));
        }
        assert_eq!(
            state.call_number(71),
            DrawEvent::OpponentWon {
                number: 71,
                pattern: WinPattern::Row(0)
            }
        );
        assert_eq!(state.state, SessionState::Over);
        assert_eq!(
            state.outcome,
            Some(Outcome::won(Winner::Opponent, WinPattern::Row(0)))
        );

        // Game over freezes the draw loop.
        assert_eq!(state.draw_tick(), DrawEvent::Skipped);
        assert_eq!(state.called.len(), 5);
    }

    #[test]
    fn test_pool_exhaustion_is_a_draw() {
        let mut state = scripted_game();
        state.pool.clear();

        assert_eq!(state.draw_tick(), DrawEvent::Exhausted);
        assert_eq!(state.state, SessionState::Over);
        let outcome = state.outcome.unwrap();
        assert_eq!(outcome.winner, Winner::Draw);
        assert_eq!(outcome.description(), "No more numbers to call");
    }

    #[test]
    fn test_full_pool_always_finishes() {
        let mut state = GameState::new(4242);
        state.start();

        let mut draws = 0;
        while state.is_playing() {
            state.draw_tick();
            draws += 1;
            assert!(draws <= 76);
        }
        // Every opponent number is called by the 75th draw.
        assert_eq!(state.outcome.unwrap().winner, Winner::Opponent);
        assert!(state.called.len() <= 75);
    }

    #[test]
    fn test_call_number_rejects_drawn_and_idle() {
        let mut state = GameState::new(1);
        assert_eq!(state.call_number(5), DrawEvent::Skipped);

        let mut state = scripted_game();
        assert_eq!(state.call_number(5), DrawEvent::Called(5));
        assert_eq!(state.call_number(5), DrawEvent::Skipped);
        assert_eq!(state.call_number(0), DrawEvent::Skipped);
        assert_eq!(state.call_number(76), DrawEvent::Skipped);
        assert_eq!(state.called.as_slice(), &[5]);
    }

    #[test]
    fn test_mark_requires_called_number() {
        let mut state = scripted_game();
        assert!(!state.mark(1));
        assert!(state.marked.is_empty());

        state.call_number(1);
        assert!(state.mark(1));
        assert_eq!(state.marked.as_slice(), &[1]);
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut state = scripted_game();
        state.call_number(1);

        assert!(state.mark(1));
        assert!(!state.mark(1));
        assert_eq!(state.marked.len(), 1);
    }

    #[test]
    fn test_mark_ignored_unless_playing() {
        let mut state = scripted_game();
        state.call_number(1);
        state.pause();

        assert!(!state.mark(1));
        assert!(state.marked.is_empty());

        state.resume();
        assert!(state.mark(1));
    }

    #[test]
    fn test_mark_number_not_on_card_is_recorded() {
        // Marks are acknowledgements of calls; only card cells count for lines.
        let mut state = scripted_game();
        state.call_number(75);
        assert!(state.mark(75));
        assert!(!state.claim_eligible);
    }

    #[test]
    fn test_claim_eligible_after_completing_line() {
        let mut state = scripted_game();
        // Human column B: 1..=5.
        for n in 1..=5 {
            state.call_number(n);
        }
        for n in 1..=4 {
            assert!(state.mark(n));
            assert!(!state.claim_eligible);
        }
        assert!(state.mark(5));
        assert!(state.claim_eligible);
        assert_eq!(state.state, SessionState::Playing);
    }

    #[test]
    fn test_claim_wins_with_complete_line() {
        let mut state = scripted_game();
        // Human row 3 crosses the free cell: 3, 18, 48, 63.
        for n in [3, 18, 48, 63] {
            state.call_number(n);
            state.mark(n);
        }

        assert_eq!(state.claim(), ClaimOutcome::Won(WinPattern::Row(2)));
        assert_eq!(state.state, SessionState::Over);
        assert_eq!(
            state.outcome,
            Some(Outcome::won(Winner::Human, WinPattern::Row(2)))
        );
        assert_eq!(state.claim(), ClaimOutcome::Ignored);
    }

    #[test]
    fn test_false_claim_sets_flag_only() {
        let mut state = scripted_game();
        state.call_number(1);
        state.mark(1);

        let ClaimOutcome::FalseClaim { token } = state.claim() else {
            panic!("expected a false claim");
        };
        assert!(state.false_claim);
        assert_eq!(state.state, SessionState::Playing);
        assert!(state.outcome.is_none());
        assert_eq!(state.called.len(), 1);
        assert_eq!(state.marked.len(), 1);

        assert!(state.clear_false_claim(token));
        assert!(!state.false_claim);
        assert!(!state.clear_false_claim(token));
    }

    #[test]
    fn test_newer_false_claim_supersedes_older_expiry() {
        let mut state = scripted_game();
        let ClaimOutcome::FalseClaim { token: first } = state.claim() else {
            panic!("expected a false claim");
        };
        let ClaimOutcome::FalseClaim { token: second } = state.claim() else {
            panic!("expected a false claim");
        };
        assert_ne!(first, second);

        assert!(!state.clear_false_claim(first));
        assert!(state.false_claim);
        assert!(state.clear_false_claim(second));
    }

    #[test]
    fn test_claim_ignored_when_idle() {
        let mut state = GameState::new(1);
        assert_eq!(state.claim(), ClaimOutcome::Ignored);
        assert!(!state.false_claim);
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut state = GameState::new(1);
        assert!(!state.pause());
        assert!(!state.resume());

        state.start();
        assert!(!state.resume());
        assert!(state.pause());
        assert!(!state.pause());
        assert_eq!(state.state, SessionState::Paused);
        assert!(state.resume());
        assert_eq!(state.state, SessionState::Playing);

        assert!(state.toggle_pause());
        assert_eq!(state.state, SessionState::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.state, SessionState::Playing);
    }

    #[test]
    fn test_pause_does_not_touch_numbers() {
        let mut state = GameState::new(9);
        state.start();
        state.draw_tick();
        state.draw_tick();
        let called = state.called.clone();
        let remaining = state.pool.len();

        state.pause();
        state.resume();
        assert_eq!(state.called, called);
        assert_eq!(state.pool.len(), remaining);
    }

    #[test]
    fn test_snapshot_playable_only_while_playing() {
        let mut state = scripted_game();
        assert!(state.snapshot().playable());

        state.pause();
        assert!(!state.snapshot().playable());
        state.resume();
        assert!(state.snapshot().playable());

        state.pool.clear();
        state.draw_tick();
        assert!(!state.snapshot().playable());
    }

    #[test]
    fn test_pause_ignored_when_over() {
        let mut state = scripted_game();
        state.pool.clear();
        state.draw_tick();

        assert!(!state.pause());
        assert!(!state.toggle_pause());
        assert_eq!(state.state, SessionState::Over);
    }

    #[test]
    fn test_is_covered_per_player() {
        let mut state = scripted_game();
        state.call_number(1);

        assert!(state.is_covered(Player::Opponent, Cell::Number(1)));
        assert!(!state.is_covered(Player::Human, Cell::Number(1)));
        assert!(state.is_covered(Player::Human, Cell::Free));

        state.mark(1);
        assert!(state.is_covered(Player::Human, Cell::Number(1)));
    }

    #[test]
    fn test_apply_action() {
        let mut state = GameState::new(3);
        assert!(state.apply_action(GameAction::Start));
        assert!(state.apply_action(GameAction::TogglePause));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(state.apply_action(GameAction::Resume));
        assert!(!state.apply_action(GameAction::Mark(1)));
        assert!(state.apply_action(GameAction::Claim));
        assert!(state.false_claim);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = scripted_game();
        state.call_number(1);
        state.call_number(16);
        state.mark(16);

        let snap = state.snapshot();
        assert_eq!(snap.state, SessionState::Playing);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.seed, 12345);
        assert_eq!(snap.human, Some(low_card()));
        assert_eq!(snap.opponent, Some(high_card()));
        assert_eq!(snap.called.as_slice(), &[1, 16]);
        assert_eq!(snap.marked.as_slice(), &[16]);
        assert_eq!(snap.remaining, 73);
        assert!(!snap.claim_eligible);
        assert!(snap.outcome.is_none());
    }
}
