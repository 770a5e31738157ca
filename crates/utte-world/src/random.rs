//! Random draws for the simulation.
//!
//! Every probabilistic decision in the engine (event triggers, targets,
//! colonization, trade sizes, seeding) goes through [`RandomSource`], so a
//! tick can be driven with a real generator in production and with a
//! fixed script in tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random draws used by the simulation.
pub trait RandomSource: Send {
    /// Uniform real in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn int_less_than(&mut self, n: usize) -> usize;

    /// Uniform integer in `[min, max)`. Returns `min` when the range is
    /// empty.
    fn int_in_range(&mut self, min: u32, max: u32) -> u32;
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed deterministically, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn uniform01(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn int_less_than(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }

    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Scripted [`RandomSource`] that replays queued values.
///
/// Uniform draws and integer draws come from separate queues. When a queue
/// runs dry the configured default is returned. Integer draws are clamped
/// into the requested range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    ints: VecDeque<u32>,
    default_uniform: f64,
    default_int: u32,
}

impl ScriptedRandom {
    /// Create a script from uniform and integer draws.
    pub fn new(uniforms: impl IntoIterator<Item = f64>, ints: impl IntoIterator<Item = u32>) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            ints: ints.into_iter().collect(),
            default_uniform: 0.0,
            default_int: 0,
        }
    }

    /// Set the values returned once the queues are exhausted.
    #[must_use]
    pub const fn with_defaults(mut self, uniform: f64, int: u32) -> Self {
        self.default_uniform = uniform;
        self.default_int = int;
        self
    }

    /// Number of uniform draws still queued.
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }

    /// Number of integer draws still queued.
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }

    fn next_int(&mut self) -> u32 {
        self.ints.pop_front().unwrap_or(self.default_int)
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform01(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(self.default_uniform)
    }

    fn int_less_than(&mut self, n: usize) -> usize {
        let raw = usize::try_from(self.next_int()).unwrap_or(usize::MAX);
        if n == 0 {
            return 0;
        }
        raw.min(n.saturating_sub(1))
    }

    fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        let raw = self.next_int();
        if max <= min {
            return min;
        }
        raw.clamp(min, max.saturating_sub(1))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn rng_source_respects_bounds() {
        let mut random = RngSource::new(SmallRng::seed_from_u64(7));
        for _ in 0..1000 {
            let u = random.uniform01();
            assert!((0.0..1.0).contains(&u));
            assert!(random.int_less_than(4) < 4);
            let v = random.int_in_range(600, 4200);
            assert!((600..4200).contains(&v));
        }
    }

    #[test]
    fn empty_ranges_are_safe() {
        let mut random = RngSource::seeded(1);
        assert_eq!(random.int_less_than(0), 0);
        assert_eq!(random.int_in_range(5, 5), 5);
        assert_eq!(random.int_in_range(9, 3), 9);
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.int_in_range(0, 1000), b.int_in_range(0, 1000));
        }
    }

    #[test]
    fn scripted_replays_then_defaults() {
        let mut random = ScriptedRandom::new([0.1, 0.9], [3, 99]).with_defaults(0.5, 1);
        assert_eq!(random.uniform01(), 0.1);
        assert_eq!(random.uniform01(), 0.9);
        assert_eq!(random.uniform01(), 0.5);
        assert_eq!(random.int_less_than(10), 3);
        // Clamped to n - 1.
        assert_eq!(random.int_less_than(10), 9);
        assert_eq!(random.int_in_range(600, 4200), 600);
        assert_eq!(random.remaining_uniforms(), 0);
        assert_eq!(random.remaining_ints(), 0);
    }
}
