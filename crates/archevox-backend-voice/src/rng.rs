//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the voice backend flows through this module. Each
//! stochastic component gets its own stream derived from the call seed and a
//! string key, so enabling one aberration stage never shifts the noise drawn
//! by another.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 generator from a call seed.
///
/// PCG32 takes 64 bits of state; the seed fills both halves.
pub fn create_rng(seed: u32) -> Pcg32 {
    Pcg32::seed_from_u64((u64::from(seed) << 32) | u64::from(seed))
}

/// Seed for the stream named `key`: the first four bytes (little-endian) of
/// `BLAKE3(seed_le || key)`.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&base_seed.to_le_bytes());
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    let [a, b, c, d, ..] = *digest.as_bytes();
    u32::from_le_bytes([a, b, c, d])
}

/// Creates an RNG for a named component.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}
