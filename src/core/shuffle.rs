//! Reproducible per-participant shuffling.
//!
//! The seed is derived from SHA-256 of the participant's UTF-8 name, read as
//! a big-endian integer and reduced mod 2^32 (the last four digest bytes).
//! It keys a ChaCha8 stream (seed as four little-endian bytes, remaining key
//! bytes zero), and the permutation is a Fisher-Yates pass over the sorted
//! candidates from the last index down. Each swap index is drawn from
//! `[0, i]` by rejection sampling on `next_u32`: values below
//! `2^32 mod (i + 1)` are discarded and the rest are taken mod `i + 1`.
//! Every step is fixed, so the same name and candidates give the same order
//! on every run and in any implementation following these rules.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// 32-bit seed for a participant name
pub fn seed_for(name: &str) -> u32 {
    let digest = Sha256::digest(name.as_bytes());
    let tail = [digest[28], digest[29], digest[30], digest[31]];
    u32::from_be_bytes(tail)
}

fn rng_for(name: &str) -> ChaCha8Rng {
    let mut key = [0u8; 32];
    key[..4].copy_from_slice(&seed_for(name).to_le_bytes());
    ChaCha8Rng::from_seed(key)
}

/// Uniform value in `[0, bound)`; `bound` must be non-zero
fn bounded(rng: &mut impl RngCore, bound: u32) -> u32 {
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let value = rng.next_u32();
        if value >= threshold {
            return value % bound;
        }
    }
}

/// Deterministic pseudorandom permutation of `candidates`, seeded by `name`
///
/// The input order does not matter: candidates are sorted and de-duplicated
/// before shuffling.
pub fn seeded_permutation<S: AsRef<str>>(name: &str, candidates: &[S]) -> Vec<String> {
    let mut items: Vec<String> = candidates.iter().map(|c| c.as_ref().to_string()).collect();
    items.sort_unstable();
    items.dedup();

    let mut rng = rng_for(name);
    for i in (1..items.len()).rev() {
        let j = bounded(&mut rng, (i + 1) as u32) as usize;
        items.swap(i, j);
    }
    items
}
