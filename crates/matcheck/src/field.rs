// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Random sampling over the finite fields used by the Freivalds check.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Candidate moduli for the Freivalds check.
///
/// A false `Match` has probability at most `1/p` per trial, so the smallest
/// candidate fixes the bound at `1/1621`.
pub const CANDIDATE_PRIMES: [u64; 5] = [1621, 1801, 1879, 1907, 1987];

/// Smallest entry of [`CANDIDATE_PRIMES`].
pub const MIN_CANDIDATE_PRIME: u64 = 1621;

/// Draws field moduli and random vectors from its own ChaCha20 stream.
///
/// Every sampler owns its generator, so independent verifications never share
/// RNG state. Use [`FieldSampler::from_seed`] for reproducible runs.
#[derive(Debug, Clone)]
pub struct FieldSampler {
    rng: ChaCha20Rng,
}

impl FieldSampler {
    /// Creates a sampler seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Creates a deterministic sampler.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Returns a prime chosen uniformly from [`CANDIDATE_PRIMES`].
    pub fn sample_prime(&mut self) -> u64 {
        CANDIDATE_PRIMES[self.rng.gen_range(0..CANDIDATE_PRIMES.len())]
    }

    /// Returns `n` independent residues, each uniform in `[0, p)`.
    ///
    /// # Panics
    ///
    /// Panics if `p == 0`.
    pub fn sample_vector(&mut self, n: usize, p: u64) -> Vec<u64> {
        (0..n).map(|_| self.rng.gen_range(0..p)).collect()
    }
}

impl Default for FieldSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}
