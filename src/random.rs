//! Seedable random source shared by the engine and every operator.
//!
//! Nothing in this crate reads a process-wide generator: runs create a
//! [`StdRng`] from a seed (or accept one from the caller) and thread it
//! through every operator call.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
