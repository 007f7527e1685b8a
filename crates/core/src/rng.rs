//! RNG module - seeded randomness for cards and draws
//!
//! Every random decision in a session (both cards, every draw) flows through
//! one [`GameRng`], so a given seed replays an identical game. ChaCha8 keeps
//! this fast while giving uniform draws.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic game RNG
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, remembering the chosen seed for replay.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, len)`
    ///
    /// `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
