//! Seedable game RNG.
//!
//! Every randomized gameplay decision (spawn delay, spawn position, launch impulse)
//! draws from this resource so a fixed seed replays the same session.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Uniform sample in `[min, max]`. A degenerate range yields `min`.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..=max)
    }

    /// Uniform sample in `[-half_extent, half_extent]`.
    #[inline]
    pub fn symmetric(&mut self, half_extent: f32) -> f32 {
        let h = half_extent.abs();
        self.range(-h, h)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
