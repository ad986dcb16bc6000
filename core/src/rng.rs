//! Randomness seam for the planners.

use std::ops::RangeInclusive;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the random draws the planners make.
///
/// Both draws are integer-valued: the original game picks whole degrees
/// and whole turns, and keeping that granularity keeps resting angles on
/// the same lattice. Implementations must be uniform over the range.
pub trait SpinRng {
    /// Uniform integer-degree draw from an inclusive range. The range may
    /// extend below zero (slice 0's band starts at -6 degrees).
    fn degrees_in(&mut self, range: RangeInclusive<i32>) -> i32;

    /// Uniform full-turn count from an inclusive range.
    fn turns_in(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// Default generator backed by the thread-local rng.
#[derive(Debug, Default)]
pub struct GameRng(ThreadRng);

impl GameRng {
    #[must_use]
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl SpinRng for GameRng {
    fn degrees_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.0.random_range(range)
    }

    fn turns_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.0.random_range(range)
    }
}

/// Deterministic generator for scenario tests and reproducible plans.
#[derive(Debug, Clone)]
pub struct SeededRng(StdRng);

impl SeededRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl SpinRng for SeededRng {
    fn degrees_in(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.0.random_range(range)
    }

    fn turns_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.0.random_range(range)
    }
}
