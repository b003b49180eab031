//! Repetition code with per-bit majority-vote decoding.
//!
//! The simplest channel code: transmit every byte N times in a row. The
//! decoder recovers each output byte by voting over the N received
//! copies, one bit position at a time, so a bit survives as long as
//! fewer than half of its copies flipped. Ties (possible only for even
//! N) round up to 1.
//!
//! R3 corrects any single flipped copy per bit; RN in general corrects
//! up to floor((N-1)/2). Beyond that the vote simply elects the wrong
//! value — that is a statistical failure detected by the verifier, not
//! an error.

use crate::error::{BlockCodeError, ParameterError, Result};

/// Repeat counts this code supports (1 is a passthrough).
const SUPPORTED_REPEATS: [usize; 6] = [1, 2, 3, 5, 7, 9];

/// N-fold repetition codec.
#[derive(Debug, Clone, Copy)]
pub struct RepetitionCode {
    repeats: usize,
}

impl RepetitionCode {
    /// Create a code transmitting `repeats` copies of every byte.
    ///
    /// # Errors
    /// `ParameterError::UnsupportedRepeats` if `repeats` is not one of
    /// {1, 2, 3, 5, 7, 9}.
    pub fn new(repeats: usize) -> Result<Self> {
        if !SUPPORTED_REPEATS.contains(&repeats) {
            return Err(ParameterError::UnsupportedRepeats(repeats).into());
        }
        Ok(Self { repeats })
    }

    /// Number of copies per byte.
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Flipped copies per bit this code is guaranteed to correct.
    pub fn correctable_flips(&self) -> usize {
        (self.repeats - 1) / 2
    }

    /// Replicate every byte `repeats` times contiguously.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(data.len() * self.repeats);
        for &byte in data {
            for _ in 0..self.repeats {
                encoded.push(byte);
            }
        }
        encoded
    }

    /// Majority-vote each bit position across the received copies.
    ///
    /// # Errors
    /// `BlockCodeError::LengthNotMultiple` if the buffer cannot be split
    /// into groups of `repeats` bytes.
    pub fn decode(&self, received: &[u8]) -> Result<Vec<u8>> {
        if received.len() % self.repeats != 0 {
            return Err(BlockCodeError::LengthNotMultiple {
                len: received.len(),
                repeats: self.repeats,
            }
            .into());
        }

        let mut decoded = Vec::with_capacity(received.len() / self.repeats);
        for group in received.chunks_exact(self.repeats) {
            decoded.push(vote(group, self.repeats));
        }
        Ok(decoded)
    }
}

/// Vote one output byte from `n` received copies.
fn vote(copies: &[u8], n: usize) -> u8 {
    let mut byte = 0u8;
    for bit in 0..8 {
        let ones: usize = copies
            .iter()
            .map(|&c| ((c >> bit) & 1) as usize)
            .sum();
        // round half up: a tie elects 1
        if 2 * ones >= n {
            byte |= 1 << bit;
        }
    }
    byte
}
