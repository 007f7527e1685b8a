//! Number bookkeeping: the draw pool and fixed-capacity number sets.
//!
//! Both are stack-only. A session never holds more than 75 numbers, so the
//! pool is an `ArrayVec` and membership tests use a 128-bit mask.

use arrayvec::ArrayVec;

use crate::rng::GameRng;
use crate::types::MAX_NUMBER;

/// Capacity of every per-session number list
pub const POOL_CAPACITY: usize = MAX_NUMBER as usize;

/// Set of numbers in `1..=75`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberSet {
    bits: u128,
}

impl NumberSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Insert a number. Returns false if it was already present or out of range.
    pub fn insert(&mut self, n: u8) -> bool {
        if !in_range(n) || self.contains(n) {
            return false;
        }
        self.bits |= 1u128 << n;
        true
    }

    pub fn contains(&self, n: u8) -> bool {
        in_range(n) && self.bits & (1u128 << n) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_NUMBER).filter(move |&n| self.contains(n))
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = NumberSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

fn in_range(n: u8) -> bool {
    (1..=MAX_NUMBER).contains(&n)
}

/// Numbers not yet drawn this session
///
/// Starts full, shrinks by one per draw, never refills until [`Pool::reset`].
#[derive(Debug, Clone)]
pub struct Pool {
    remaining: ArrayVec<u8, POOL_CAPACITY>,
}

impl Pool {
    /// A full pool `1..=75`
    pub fn new() -> Self {
        let mut pool = Self {
            remaining: ArrayVec::new(),
        };
        pool.reset();
        pool
    }

    pub fn reset(&mut self) {
        self.remaining.clear();
        self.remaining.extend(1..=MAX_NUMBER);
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, n: u8) -> bool {
        self.remaining.contains(&n)
    }

    /// Remove and return a uniformly chosen number, or `None` when empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<u8> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.index(self.remaining.len());
        Some(self.remaining.swap_remove(index))
    }

    /// Remove a specific number. Returns false if it was already drawn.
    pub fn take(&mut self, n: u8) -> bool {
        match self.remaining.iter().position(|&r| r == n) {
            Some(index) => {
                self.remaining.swap_remove(index);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.remaining.clear();
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
