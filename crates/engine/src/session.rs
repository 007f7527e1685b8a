//! Live session: a [`GameState`] plus the timers that drive it.
//!
//! The draw scheduler is one tokio task per playing stretch. Every
//! transition that starts or stops drawing (start, pause, resume, game over)
//! bumps an epoch under the state lock and aborts the previous task. A task
//! re-checks its epoch under the same lock before each draw, so a tick that
//! was already waiting for the lock when the session paused is discarded
//! rather than applied.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::core::{ClaimOutcome, Deal, DrawEvent, GameSnapshot, GameState};
use crate::error::EngineError;
use crate::types::{GameAction, SessionState};

struct Shared {
    game: GameState,
    /// Draw-loop epoch; a task only draws while this matches its own.
    epoch: u64,
}

impl Shared {
    fn bump_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the single live game
///
/// Commands are synchronous and return immediately; draws and false-claim
/// expiry run on the tokio runtime the session was created on.
pub struct Session {
    shared: Arc<Mutex<Shared>>,
    runtime: Handle,
    config: EngineConfig,
    draw_task: Option<JoinHandle<()>>,
    claim_task: Option<JoinHandle<()>>,
}

impl Session {
    /// Create an idle session on the current tokio runtime.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let runtime = Handle::try_current()?;
        Self::with_handle(config, runtime)
    }

    /// Create an idle session that spawns its timers on `runtime`.
    ///
    /// Commands may then be issued from threads outside the runtime.
    pub fn with_handle(config: EngineConfig, runtime: Handle) -> Result<Self, EngineError> {
        config.validate()?;
        let game = match config.seed {
            Some(seed) => GameState::new(seed),
            None => GameState::from_entropy(),
        };
        debug!("session created with seed {}", game.seed());

        Ok(Self {
            shared: Arc::new(Mutex::new(Shared { game, epoch: 0 })),
            runtime,
            config,
            draw_task: None,
            claim_task: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a fresh game with random cards, superseding any running one.
    pub fn start(&mut self) {
        let epoch = {
            let mut shared = lock(&self.shared);
            shared.game.start();
            shared.bump_epoch()
        };
        self.restart_timers(epoch);
    }

    /// Start a fresh game with the given cards.
    pub fn start_with_deal(&mut self, deal: Deal) {
        let epoch = {
            let mut shared = lock(&self.shared);
            shared.game.start_with_deal(deal);
            shared.bump_epoch()
        };
        self.restart_timers(epoch);
    }

    pub fn pause(&mut self) -> bool {
        let paused = {
            let mut shared = lock(&self.shared);
            let paused = shared.game.pause();
            if paused {
                shared.bump_epoch();
            }
            paused
        };
        if paused {
            self.stop_draw_loop();
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let epoch = {
            let mut shared = lock(&self.shared);
            if !shared.game.resume() {
                return false;
            }
            shared.bump_epoch()
        };
        self.spawn_draw_loop(epoch);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state() {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Mark a called number on the human card.
    pub fn mark(&mut self, number: u8) -> bool {
        lock(&self.shared).game.mark(number)
    }

    /// Claim BINGO. A false claim schedules its own flag expiry.
    pub fn claim(&mut self) -> ClaimOutcome {
        let outcome = {
            let mut shared = lock(&self.shared);
            let outcome = shared.game.claim();
            if matches!(outcome, ClaimOutcome::Won(_)) {
                shared.bump_epoch();
            }
            outcome
        };

        match outcome {
            ClaimOutcome::Won(_) => self.stop_draw_loop(),
            ClaimOutcome::FalseClaim { token } => self.spawn_claim_expiry(token),
            ClaimOutcome::Ignored => {}
        }
        outcome
    }

    /// Call a specific number now, outside the regular cadence.
    pub fn call_number(&mut self, number: u8) -> DrawEvent {
        let event = {
            let mut shared = lock(&self.shared);
            let event = shared.game.call_number(number);
            if matches!(event, DrawEvent::OpponentWon { .. }) {
                shared.bump_epoch();
            }
            event
        };
        if matches!(event, DrawEvent::OpponentWon { .. }) {
            self.stop_draw_loop();
        }
        event
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

    pub fn state(&self) -> SessionState {
        lock(&self.shared).game.state()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.shared).game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        lock(&self.shared).game.snapshot_into(out);
    }

    fn restart_timers(&mut self, epoch: u64) {
        if let Some(task) = self.claim_task.take() {
            task.abort();
        }
        self.spawn_draw_loop(epoch);
    }

    fn spawn_draw_loop(&mut self, epoch: u64) {
        self.stop_draw_loop();
        let shared = Arc::clone(&self.shared);
        let period = self.config.draw_interval;
        let first_tick = Instant::now() + period;
        self.draw_task = Some(self.runtime.spawn(draw_loop(shared, epoch, first_tick, period)));
    }

    fn stop_draw_loop(&mut self) {
        if let Some(task) = self.draw_task.take() {
            task.abort();
        }
    }

    fn spawn_claim_expiry(&mut self, token: u32) {
        if let Some(task) = self.claim_task.take() {
            task.abort();
        }
        let shared = Arc::clone(&self.shared);
        let lifetime = self.config.false_claim_duration;
        self.claim_task = Some(self.runtime.spawn(async move {
            time::sleep(lifetime).await;
            if lock(&shared).game.clear_false_claim(token) {
                trace!("false claim {token} expired");
            }
        }));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_draw_loop();
        if let Some(task) = self.claim_task.take() {
            task.abort();
        }
    }
}

async fn draw_loop(
    shared: Arc<Mutex<Shared>>,
    epoch: u64,
    first_tick: Instant,
    period: Duration,
) {
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut guard = lock(&shared);
        if guard.epoch != epoch {
            trace!("discarding stale draw tick (epoch {epoch}, now {})", guard.epoch);
            return;
        }

        match guard.game.draw_tick() {
            DrawEvent::Called(_) => {}
            DrawEvent::Skipped => return,
            DrawEvent::OpponentWon { .. } | DrawEvent::Exhausted => {
                guard.bump_epoch();
                return;
            }
        }
    }
}
