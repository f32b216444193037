//! Random Sources
//!
//! Every random roll in the duel (opponent reactions, idle wander, particle
//! spray, dropped wand velocity) goes through [`RandomSource`]. A match
//! replays identically from the same seed, and tests can dictate each roll
//! with [`SequenceRng`].

use rand::prelude::*;
use rand::rngs::StdRng;

/// Source of uniform random numbers for the duel.
pub trait RandomSource {
    /// Next value in the range [0.0, 1.0).
    fn next_f32(&mut self) -> f32;

    /// Uniform value in the given range.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// -1.0 or 1.0 with equal odds.
    fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 {
            -1.0
        } else {
            1.0
        }
    }
}

/// Seeded random number generator for deterministic duels.
///
/// When a seed is provided (e.g., via headless config), the same seed and the
/// same inputs always produce the same duel. Without a seed, uses system entropy.
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for GameRng {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen()
    }
}

/// Replays a fixed cycle of values.
///
/// Values are returned in order and wrap around. Each value should be in
/// [0.0, 1.0).
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Returns the same value forever.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
