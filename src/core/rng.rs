//! RNG module - seeded, deterministic random source
//!
//! Every game session owns a `SessionRng` seeded by the collaborator that
//! constructed it. Same seed, same session: tile placement, maze walls,
//! mole positions and piece sequences all replay identically.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic per-session random source backed by PCG-32.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: Pcg32,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this session was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random value in `[0, max)`. `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..max)
    }

    /// Random index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Random float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }
}
