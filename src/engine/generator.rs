//! Deterministic array generation.
//!
//! Backed by PCG (Permuted Congruential Generator) so that, given the same
//! master seed, generated arrays are bitwise-identical across runs and
//! platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::config::{VALUE_MAX, VALUE_MIN};

/// Deterministic, reproducible input-array generator.
///
/// Values are drawn uniformly from `[VALUE_MIN, VALUE_MAX)` — the range the
/// drawable surface scales bar heights from.
#[derive(Debug, Clone)]
pub struct ArrayGenerator {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl ArrayGenerator {
    /// Create a new generator with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        let rng = Pcg64::seed_from_u64(master_seed);
        Self { master_seed, rng }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Produce a fresh random input sequence of `size` elements.
    ///
    /// The mutual-exclusion rejection against an in-flight playback is
    /// enforced by the session that owns this generator, not here.
    #[must_use]
    pub fn generate(&mut self, size: usize) -> Vec<u32> {
        (0..size)
            .map(|_| self.rng.gen_range(VALUE_MIN..VALUE_MAX))
            .collect()
    }
}
