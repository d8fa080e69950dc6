//! Bounded pseudo-random perturbations
//!
//! Forecasts and heatmaps add noise to otherwise deterministic values. The noise
//! comes from a [`JitterSource`] passed in by the caller so that runs can be
//! reproduced from a seed or replaced by a fixed source in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded samples
pub trait JitterSource: Send {
    /// Sample from `[low, high)`. Returns `low` when the range is empty or
    /// not finite.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Sample from `[low, high]`. Returns `low` when the range is empty.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;

    /// Sample from `[-bound, bound)`
    fn symmetric(&mut self, bound: f64) -> f64 {
        self.uniform(-bound, bound)
    }
}

/// Jitter backed by a standard RNG
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    /// Seed from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence from a seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl JitterSource for RandomJitter {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        // gen_range panics on an infinite span
        if high <= low || !(high - low).is_finite() {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Deterministic jitter that always lands at the same relative position
/// within the requested range (0.0 = low end, 1.0 = high end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter {
    fraction: f64,
}

impl FixedJitter {
    /// Fixed position in the range, clamped to `[0, 1]`
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    /// Always the low end of the range
    pub fn low() -> Self {
        Self::new(0.0)
    }

    /// Always the middle of the range
    pub fn midpoint() -> Self {
        Self::new(0.5)
    }

    /// Always the high end of the range
    pub fn high() -> Self {
        Self::new(1.0)
    }
}

impl JitterSource for FixedJitter {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low || !(high - low).is_finite() {
            return low;
        }
        low + (high - low) * self.fraction
    }

    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        low + ((high - low) as f64 * self.fraction).round() as i64
    }
}
