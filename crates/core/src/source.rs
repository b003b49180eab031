//! Bernoulli bit source.
//!
//! Generates the sparse binary test signals the compressors operate on.
//! All randomness comes from a seeded ChaCha8 RNG so runs are
//! reproducible: the same (n, p, seed) always yields the same sequence.

use crate::bits::BitSequence;
use crate::error::{ParameterError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `n` independent bits, each 1 with probability `p`.
///
/// # Errors
/// Returns `ParameterError::ProbabilityOutOfRange` if `p` is outside
/// [0, 1] (NaN included), and `ParameterError::EmptySequence` if `n == 0`.
pub fn bernoulli(n: usize, p: f64, seed: u64) -> Result<BitSequence> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ParameterError::ProbabilityOutOfRange { name: "p", value: p }.into());
    }
    if n == 0 {
        return Err(ParameterError::EmptySequence.into());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seq = BitSequence::with_capacity(n);
    for _ in 0..n {
        let roll: f64 = rng.gen();
        seq.push(u8::from(roll < p));
    }

    Ok(seq)
}
