//! Seeded random number generation for maze building.
//!
//! The seed string is hashed with SHA-256 and the digest seeds a ChaCha8
//! stream, so the same seed yields the same draws on every platform.
//! Every randomized step of generation (start/finish columns, carve order,
//! trap rolls) draws from one `MazeRng` in a fixed order.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Deterministic generator bound to a seed string.
#[derive(Debug, Clone)]
pub struct MazeRng {
    rng: ChaCha8Rng,
}

impl MazeRng {
    /// Create a generator whose stream is fully determined by `seed`.
    pub fn new(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self {
            rng: ChaCha8Rng::from_seed(key),
        }
    }

    /// Choose a random index from `[0, len)`. Returns 0 when `len` is 0.
    pub fn choice_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Random integer in `[0, 100)`.
    pub fn roll_percent(&mut self) -> u32 {
        self.rng.gen_range(0..100)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
