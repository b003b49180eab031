//! Binary arithmetic codec for a known-parameter Bernoulli source.
//!
//! Where run-length coding pays at least two bits per event, arithmetic
//! coding approaches the source entropy even at very small p. The encoder
//! keeps a working interval as a pair of `precision`-bit integer
//! registers `[low, high]` that narrows with every symbol: the "1" branch
//! takes the upper `p` share of the interval, the "0" branch the lower
//! `1 - p` share. Whenever the top bit of `low` and `high` agrees it is
//! settled: the bit is emitted and both registers shift left. Intervals
//! that straddle the midpoint too tightly to settle a bit defer instead,
//! and the deferred count is paid out (inverted) with the next settled
//! bit, so the registers never lose width to rounding.
//!
//! This is a non-adaptive coder: the decoder must be given the same `p`
//! that was used to encode. `p` is quantized to `freq_bits` binary digits
//! of resolution, clamped away from 0 and 1, so both sides split every
//! interval identically. A final flush emits one disambiguating bit plus
//! whatever was deferred; the decoder zero-pads past the end of the
//! stream and resolves exactly `n` bits.
//!
//! Register width and probability resolution are adjustable via
//! [`ArithmeticCodec::with_tuning`]; the defaults suit the whole
//! supported (n, p) range.

use crate::bits::BitSequence;
use crate::error::{ParameterError, Result};

/// Width of the interval registers, in bits.
pub const DEFAULT_PRECISION: u32 = 32;

/// Binary digits of resolution kept when quantizing p.
pub const DEFAULT_FREQ_BITS: u32 = 16;

/// Fixed-probability binary arithmetic coder.
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticCodec {
    p: f64,
    precision: u32,
    freq_bits: u32,
    // quantized P(1) in [1, 2^freq_bits - 1]
    one_weight: u64,
}

impl ArithmeticCodec {
    /// Create a codec for Bernoulli(p) input with the default tuning.
    ///
    /// # Errors
    /// `ParameterError::DegenerateProbability` unless `0 < p < 1`:
    /// at the endpoints one branch has zero width and the interval
    /// can never resolve.
    pub fn new(p: f64) -> Result<Self> {
        Self::with_tuning(p, DEFAULT_PRECISION, DEFAULT_FREQ_BITS)
    }

    /// Create a codec with explicit register tuning.
    ///
    /// `precision` is the interval register width; `freq_bits` is the
    /// probability resolution. The registers must leave two guard bits
    /// above the probability scale (`precision >= freq_bits + 2`) so a
    /// renormalized interval always splits into two nonempty halves,
    /// and `precision + freq_bits` must stay within the 64-bit range
    /// multiply.
    pub fn with_tuning(p: f64, precision: u32, freq_bits: u32) -> Result<Self> {
        if !(p > 0.0 && p < 1.0) {
            return Err(ParameterError::DegenerateProbability { value: p }.into());
        }
        if freq_bits < 1 || freq_bits > 30 {
            return Err(ParameterError::TuningOutOfRange {
                name: "freq_bits",
                value: freq_bits,
                min: 1,
                max: 30,
            }
            .into());
        }
        if precision < freq_bits + 2 || precision + freq_bits > 63 {
            return Err(ParameterError::TuningOutOfRange {
                name: "precision",
                value: precision,
                min: freq_bits + 2,
                max: 63 - freq_bits,
            }
            .into());
        }

        let scale = 1u64 << freq_bits;
        let one_weight = ((p * scale as f64).round() as u64).clamp(1, scale - 1);

        Ok(Self {
            p,
            precision,
            freq_bits,
            one_weight,
        })
    }

    /// The probability this codec was built for.
    pub fn p(&self) -> f64 {
        self.p
    }

    fn top(&self) -> u64 {
        (1u64 << self.precision) - 1
    }

    fn half(&self) -> u64 {
        1u64 << (self.precision - 1)
    }

    fn quarter(&self) -> u64 {
        1u64 << (self.precision - 2)
    }

    /// First value of the "1" branch: the split point of `[low, high]`.
    fn split(&self, low: u64, high: u64) -> u64 {
        let range = high - low + 1;
        let zero_weight = (1u64 << self.freq_bits) - self.one_weight;
        low + ((range * zero_weight) >> self.freq_bits)
    }

    /// Encode a bit sequence into a compressed bit stream.
    pub fn encode(&self, seq: &BitSequence) -> BitSequence {
        let half = self.half();
        let quarter = self.quarter();

        let mut out = BitSequence::with_capacity(seq.len() / 4 + 16);
        let mut low = 0u64;
        let mut high = self.top();
        let mut pending = 0u32;

        for bit in seq.iter() {
            let boundary = self.split(low, high);
            if bit == 1 {
                low = boundary;
            } else {
                high = boundary - 1;
            }

            // settled top bits shift out
            while high < half || low >= half {
                if high < half {
                    emit(&mut out, 0, &mut pending);
                } else {
                    emit(&mut out, 1, &mut pending);
                    low -= half;
                    high -= half;
                }
                low <<= 1;
                high = (high << 1) | 1;
            }

            // straddling the midpoint: defer until the interval commits
            while low >= quarter && high < half + quarter {
                pending += 1;
                low = (low - quarter) << 1;
                high = ((high - quarter) << 1) | 1;
            }
        }

        // flush: the final interval contains [quarter, half) or
        // [half, half + quarter), and one more bit picks which
        pending += 1;
        if low < quarter {
            emit(&mut out, 0, &mut pending);
        } else {
            emit(&mut out, 1, &mut pending);
        }

        out
    }

    /// Decode `n` bits from a compressed stream.
    ///
    /// Mirrors the encoder's narrowing against a window of the received
    /// stream, zero-padding once the stream runs out. Always produces
    /// `n` bits; a stream that was truncated or never produced by this
    /// codec decodes to garbage, and exactness is the verifier's job.
    pub fn decode(&self, compressed: &BitSequence, n: usize) -> BitSequence {
        let half = self.half();
        let quarter = self.quarter();

        let mut out = BitSequence::with_capacity(n);
        let mut low = 0u64;
        let mut high = self.top();

        let mut pos = 0usize;
        let mut value = 0u64;
        for _ in 0..self.precision {
            value = (value << 1) | read_bit(compressed, &mut pos);
        }

        for _ in 0..n {
            let boundary = self.split(low, high);
            if value >= boundary {
                out.push(1);
                low = boundary;
            } else {
                out.push(0);
                high = boundary - 1;
            }

            loop {
                if high < half {
                    // top bit settled as 0, nothing to subtract
                } else if low >= half {
                    low -= half;
                    high -= half;
                    value -= half;
                } else if low >= quarter && high < half + quarter {
                    low -= quarter;
                    high -= quarter;
                    value -= quarter;
                } else {
                    break;
                }
                low <<= 1;
                high = (high << 1) | 1;
                value = (value << 1) | read_bit(compressed, &mut pos);
            }
        }

        out
    }
}

/// Push a settled bit plus the deferred bits it resolves (inverted).
fn emit(out: &mut BitSequence, bit: u8, pending: &mut u32) {
    out.push(bit);
    for _ in 0..*pending {
        out.push(1 - bit);
    }
    *pending = 0;
}

/// Next stream bit, or 0 once the stream is exhausted.
fn read_bit(stream: &BitSequence, pos: &mut usize) -> u64 {
    let bit = if *pos < stream.len() {
        stream.get(*pos) as u64
    } else {
        0
    };
    *pos += 1;
    bit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;

    fn round_trip(n: usize, p: f64, seed: u64) {
        let seq = source::bernoulli(n, p, seed).unwrap();
        let codec = ArithmeticCodec::new(p).unwrap();
        let compressed = codec.encode(&seq);
        let decoded = codec.decode(&compressed, n);
        assert_eq!(decoded, seq, "round trip failed for n={n} p={p} seed={seed}");
    }

    #[test]
    fn test_round_trip_sparse() {
        round_trip(10_000, 0.001, 42);
        round_trip(10_000, 0.01, 43);
    }

    #[test]
    fn test_round_trip_moderate() {
        round_trip(2_000, 0.1, 7);
        round_trip(2_000, 0.3, 8);
    }

    #[test]
    fn test_round_trip_many_seeds() {
        for seed in 0..20 {
            round_trip(1_000, 0.05, seed);
        }
    }

    #[test]
    fn test_round_trip_odd_length() {
        round_trip(999, 0.05, 3);
        round_trip(4_001, 0.02, 4);
    }

    #[test]
    fn test_round_trip_fixed_sparse_pattern() {
        // a long, very sparse input with events spread across the whole
        // length, including deep into the tail
        let n = 10_000;
        let mut bits = vec![0u8; n];
        for &i in &[733usize, 1558, 2901, 3779, 5002, 7348, 9120, 9999] {
            bits[i] = 1;
        }
        let seq = BitSequence::from_bits(&bits);

        let codec = ArithmeticCodec::new(0.001).unwrap();
        let decoded = codec.decode(&codec.encode(&seq), n);
        assert_eq!(decoded, seq);
    }

    #[test]
    fn test_all_zeros_and_all_ones_input() {
        let codec = ArithmeticCodec::new(0.02).unwrap();

        let zeros = BitSequence::zeros(500);
        let decoded = codec.decode(&codec.encode(&zeros), 500);
        assert_eq!(decoded, zeros);

        let ones = BitSequence::from_bits(&vec![1u8; 64]);
        let decoded = codec.decode(&codec.encode(&ones), 64);
        assert_eq!(decoded, ones);
    }

    #[test]
    fn test_single_bit_input() {
        let codec = ArithmeticCodec::new(0.3).unwrap();
        for bit in [0u8, 1] {
            let seq = BitSequence::from_bits(&[bit]);
            let decoded = codec.decode(&codec.encode(&seq), 1);
            assert_eq!(decoded, seq);
        }
    }

    #[test]
    fn test_compresses_sparse_input() {
        let n = 20_000;
        let p = 0.001;
        let seq = source::bernoulli(n, p, 99).unwrap();
        let codec = ArithmeticCodec::new(p).unwrap();
        let compressed = codec.encode(&seq);

        assert!(compressed.len() < n / 10, "got {} bits", compressed.len());
    }

    #[test]
    fn test_tuning_round_trip() {
        // narrower registers and coarser probability still round-trip
        let n = 2_000;
        let p = 0.01;
        let seq = source::bernoulli(n, p, 11).unwrap();

        for (precision, freq_bits) in [(24, 12), (16, 8), (61, 2)] {
            let codec = ArithmeticCodec::with_tuning(p, precision, freq_bits).unwrap();
            let decoded = codec.decode(&codec.encode(&seq), n);
            assert_eq!(decoded, seq, "precision={precision} freq_bits={freq_bits}");
        }
    }

    #[test]
    fn test_degenerate_p_rejected() {
        assert!(ArithmeticCodec::new(0.0).is_err());
        assert!(ArithmeticCodec::new(1.0).is_err());
        assert!(ArithmeticCodec::new(-0.5).is_err());
        assert!(ArithmeticCodec::new(f64::NAN).is_err());
    }

    #[test]
    fn test_tuning_out_of_range_rejected() {
        // no probability resolution at all
        assert!(ArithmeticCodec::with_tuning(0.1, DEFAULT_PRECISION, 0).is_err());
        // registers too narrow to leave guard bits above the scale
        assert!(ArithmeticCodec::with_tuning(0.1, 17, 16).is_err());
        // range multiply would overflow 64 bits
        assert!(ArithmeticCodec::with_tuning(0.1, 60, 16).is_err());
    }
}
