//! Packed bit sequences with bit-level access.
//!
//! `BitSequence` stores bits MSB-first within each byte, the conventional
//! order for serialized bit streams. It is the common currency between the
//! bit source, both compressors, and the verifier: codecs append with
//! [`BitSequence::push`] and scan with [`BitSequence::get`] or
//! [`BitSequence::iter`].
//!
//! # Padding Rules
//!
//! The packed form always knows its exact bit length, so trailing padding
//! inside the final byte is invisible to `get`/`iter`. Converting to raw
//! bytes with [`BitSequence::to_bytes`] pads the last byte with zeros.

/// An ordered, fixed-length sequence of bits, packed 8 per byte.
///
/// # Invariants
/// - `len <= bytes.len() * 8`
/// - bits at positions >= `len` in the final byte are zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty sequence with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Create a sequence of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bytes: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Build a sequence from a slice of 0/1 values.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut seq = Self::with_capacity(bits.len());
        for &b in bits {
            seq.push(b);
        }
        seq
    }

    /// Reinterpret a byte buffer bit-by-bit, MSB of each byte first.
    ///
    /// The resulting sequence has exactly `buffer.len() * 8` bits.
    pub fn from_bytes(buffer: &[u8]) -> Self {
        Self {
            bytes: buffer.to_vec(),
            len: buffer.len() * 8,
        }
    }

    /// Append a single bit. Any nonzero value counts as 1.
    pub fn push(&mut self, bit: u8) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit != 0 {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << (7 - offset);
        }
        self.len += 1;
    }

    /// Read the bit at `index` (0 or 1).
    ///
    /// # Panics
    /// Panics if `index >= len`; codecs always iterate within bounds.
    pub fn get(&self, index: usize) -> u8 {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        (self.bytes[index / 8] >> (7 - index % 8)) & 1
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Count of 1 bits.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate over bits as 0/1 values.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Return the packed bytes, final byte zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl Default for BitSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<u8> for BitSequence {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut seq = Self::new();
        for bit in iter {
            seq.push(bit);
        }
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_get_round_trip() {
        let pattern = [1u8, 0, 1, 1, 0, 0, 1, 0, 1];
        let seq = BitSequence::from_bits(&pattern);

        assert_eq!(seq.len(), 9);
        for (i, &bit) in pattern.iter().enumerate() {
            assert_eq!(seq.get(i), bit);
        }
    }

    #[test]
    fn test_packing_is_msb_first() {
        let seq = BitSequence::from_bits(&[1, 0, 1, 1, 0, 0, 1, 0]);
        assert_eq!(seq.to_bytes(), vec![0b10110010]);
    }

    #[test]
    fn test_partial_byte_padding() {
        let seq = BitSequence::from_bits(&[1]);
        assert_eq!(seq.to_bytes(), vec![0b10000000]);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_from_bytes() {
        let seq = BitSequence::from_bytes(&[0b10100000, 0xFF]);
        assert_eq!(seq.len(), 16);
        assert_eq!(seq.get(0), 1);
        assert_eq!(seq.get(1), 0);
        assert_eq!(seq.get(2), 1);
        assert_eq!(seq.get(8), 1);
        assert_eq!(seq.count_ones(), 10);
    }

    #[test]
    fn test_zeros() {
        let seq = BitSequence::zeros(12);
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.count_ones(), 0);
    }

    #[test]
    fn test_iter_matches_get() {
        let seq = BitSequence::from_bits(&[0, 1, 1, 0, 1]);
        let collected: Vec<u8> = seq.iter().collect();
        assert_eq!(collected, vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_from_iterator() {
        let seq: BitSequence = [1u8, 1, 0].into_iter().collect();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.count_ones(), 2);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let seq = BitSequence::from_bits(&[1, 0]);
        seq.get(2);
    }
}
