//! Entropy for the generators.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Supplies uniformly distributed integers to the generators.
///
/// Each session owns its own source; nothing here is shared between sessions.
pub trait RandomSource: Send {
    /// A uniformly distributed integer in `min..=max`.
    fn random_integer(&mut self, min: u64, max: u64) -> u64;

    /// Shuffle `items` in place (Fisher-Yates over [`Self::random_integer`]).
    fn shuffle(&mut self, items: &mut [u8]) {
        for i in (1..items.len()).rev() {
            let j = self.random_integer(0, i as u64) as usize;
            items.swap(i, j);
        }
    }
}

/// [`RandomSource`] backed by [`StdRng`], reproducible when seeded.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededRandom {
    /// Deterministic source: the same seed always yields the same sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Non-reproducible source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn random_integer(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn shuffle(&mut self, items: &mut [u8]) {
        items.shuffle(&mut self.rng);
    }
}

/// Replays a fixed list of integers, clamped into the requested range.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn random_integer(&mut self, min: u64, max: u64) -> u64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(min, max)
    }
}
