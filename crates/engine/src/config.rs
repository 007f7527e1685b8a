//! Engine configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::error::EngineError;
use crate::types::{DRAW_INTERVAL_MS, FALSE_CLAIM_MS};

/// Timing and seeding for a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Period between two draws.
    pub draw_interval: Duration,
    /// How long the false-claim flag stays raised.
    pub false_claim_duration: Duration,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draw_interval: Duration::from_millis(DRAW_INTERVAL_MS),
            false_claim_duration: Duration::from_millis(FALSE_CLAIM_MS),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `BINGO_DRAW_INTERVAL_MS`: draw period (default 3000)
    /// - `BINGO_FALSE_CLAIM_MS`: false-claim flag lifetime (default 3000)
    /// - `BINGO_SEED`: fixed RNG seed (default: random)
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let draw_interval_ms = env_parse("BINGO_DRAW_INTERVAL_MS").unwrap_or(DRAW_INTERVAL_MS);
        let false_claim_ms = env_parse("BINGO_FALSE_CLAIM_MS").unwrap_or(FALSE_CLAIM_MS);
        let seed = env_parse("BINGO_SEED");

        Self {
            draw_interval: Duration::from_millis(draw_interval_ms),
            false_claim_duration: Duration::from_millis(false_claim_ms),
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_draw_interval(mut self, interval: Duration) -> Self {
        self.draw_interval = interval;
        self
    }

    pub fn with_false_claim_duration(mut self, duration: Duration) -> Self {
        self.false_claim_duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.draw_interval.is_zero() {
            return Err(EngineError::ZeroDuration {
                name: "draw_interval",
            });
        }
        if self.false_claim_duration.is_zero() {
            return Err(EngineError::ZeroDuration {
                name: "false_claim_duration",
            });
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={trimmed:?}: not a valid number");
            None
        }
    }
}
