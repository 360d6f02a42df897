//! Randomness used by the stochastic animations and the fire model.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Default seed for [`SeededRandom::default`].
pub const DEFAULT_SEED: u64 = 0x5EED_1ED5;

/// Source of uniformly distributed floats.
///
/// Animations never reach for a global generator; they receive one of these so
/// tests can plug in fixed sequences.
pub trait RandomSource {
    /// Next value in `[0.0, 1.0)`.
    fn next_f32(&mut self) -> f32;

    /// Next index in `0..upper`. Returns 0 when `upper` is 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let picked = (self.next_f32() * upper as f32) as usize;
        picked.min(upper - 1)
    }

    /// Next value in `[low, high)`.
    fn next_range(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Small, fast PRNG for on-device use.
#[derive(Debug, Clone)]
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Seed for an independent generator.
    pub fn next_seed(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}
