//! Blue-noise point sampling over an integer grid domain.
//!
//! This module hosts the Poisson disk sampler, its background acceleration
//! grid, and the deterministic RNG plumbing that feeds every stochastic
//! decision in a generation run.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub(crate) mod grid;
pub mod poisson_disk;

pub use poisson_disk::PoissonDiskSampling;

/// Create the crate's deterministic RNG from a seed.
///
/// All sampling entry points take `&mut dyn RngCore`, so callers own the
/// stream. Identical seeds reproduce identical output; reproducibility is
/// only promised within this one RNG implementation, not across different
/// RNG choices.
pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive a decorrelated seed for one layer of a generation run.
///
/// Generators that share a map seed salt it through here so sibling layers
/// do not consume identical random streams.
pub fn seed_for_layer(base_seed: u64, salt: u64) -> u64 {
    mix_u64(base_seed ^ salt.wrapping_mul(0x9E3779B97F4A7C15))
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
