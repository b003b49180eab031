//! Single-error-correcting (8,4) nibble code.
//!
//! Every 4-bit nibble becomes an 8-bit codeword: the data nibble in the
//! upper half, a parity nibble from a fixed 16-entry table in the lower
//! half. The parity bits satisfy three linear checks over fixed bit
//! masks of the codeword; on receive, recomputing those checks yields a
//! 3-bit syndrome that identifies any single flipped bit. Syndromes
//! pointing at a data bit select a correction mask for the upper nibble;
//! syndromes pointing at a parity bit (or syndrome 0) leave the data
//! untouched.
//!
//! One byte of input encodes to two codeword bytes. Any single bit flip
//! per codeword is corrected exactly; two or more flips in one codeword
//! may decode to a wrong nibble silently — the verifier, not the
//! decoder, reports that damage.

use crate::error::{BlockCodeError, Result};

/// Parity nibble for each of the 16 data nibbles.
const PARITY: [u8; 16] = [0, 3, 7, 4, 6, 5, 1, 2, 5, 6, 2, 1, 3, 0, 4, 7];

/// Codeword bit masks for the three parity checks, syndrome bits 2..0.
const CHECK_MASKS: [u8; 3] = [0xE4, 0x72, 0xB1];

/// Data-nibble correction mask per syndrome value.
///
/// Syndromes 1, 2, 4 indicate a flipped parity bit: the data nibble is
/// already right, so the mask is 0.
const CORRECTION: [u8; 8] = [0, 0, 0, 1, 0, 8, 4, 2];

/// Encode one nibble (low 4 bits) into its 8-bit codeword.
pub fn encode_nibble(nibble: u8) -> u8 {
    let nibble = nibble & 0x0F;
    (nibble << 4) | PARITY[nibble as usize]
}

/// Decode one received codeword byte into its data nibble, correcting a
/// single flipped bit if the syndrome demands it.
pub fn decode_nibble(codeword: u8) -> u8 {
    let syndrome = (parity(codeword & CHECK_MASKS[0]) << 2)
        | (parity(codeword & CHECK_MASKS[1]) << 1)
        | parity(codeword & CHECK_MASKS[2]);
    (codeword >> 4) ^ CORRECTION[syndrome as usize]
}

/// Encode a byte buffer; each byte yields two codeword bytes, high
/// nibble first.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(data.len() * 2);
    for &byte in data {
        encoded.push(encode_nibble(byte >> 4));
        encoded.push(encode_nibble(byte & 0x0F));
    }
    encoded
}

/// Decode a received codeword buffer back into bytes.
///
/// # Errors
/// `BlockCodeError::OddLength` if the buffer cannot be split into
/// codeword pairs.
pub fn decode(received: &[u8]) -> Result<Vec<u8>> {
    if received.len() % 2 != 0 {
        return Err(BlockCodeError::OddLength {
            len: received.len(),
        }
        .into());
    }

    let mut decoded = Vec::with_capacity(received.len() / 2);
    for pair in received.chunks_exact(2) {
        let high = decode_nibble(pair[0]);
        let low = decode_nibble(pair[1]);
        decoded.push((high << 4) | low);
    }
    Ok(decoded)
}

/// Even/odd parity of a byte.
fn parity(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}
