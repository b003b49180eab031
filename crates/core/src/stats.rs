//! Per-trial statistics and information-theoretic reference values.
//!
//! A compression trial is judged against the source entropy: an ideal
//! coder spends about H2(p) bits per source bit. A transmission trial is
//! judged by what survived the channel: how many bits the noise flipped
//! and how many byte errors remain after decoding.
//!
//! These are observational only; nothing here feeds back into the codecs.

use crate::verify::VerifyOutcome;

/// Binary entropy H2(p) in bits per symbol.
///
/// Returns 0 at p = 0 and p = 1, where the source carries no information.
pub fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    p * (1.0 / p).log2() + (1.0 - p) * (1.0 / (1.0 - p)).log2()
}

/// Expected total information content of n Bernoulli(p) bits.
pub fn expected_information_bits(n: usize, p: f64) -> f64 {
    n as f64 * binary_entropy(p)
}

/// Outcome figures for one compression trial.
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    /// Bits in the source sequence
    pub source_bits: usize,

    /// Bits in the compressed stream
    pub compressed_bits: usize,
}

impl CompressionStats {
    /// Compression factor (source / compressed); 0 for an empty stream.
    pub fn factor(&self) -> f64 {
        if self.compressed_bits == 0 {
            0.0
        } else {
            self.source_bits as f64 / self.compressed_bits as f64
        }
    }

    /// Compressed share of the source size (compressed / source).
    pub fn ratio(&self) -> f64 {
        if self.source_bits == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.source_bits as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, p: f64, outcome: &VerifyOutcome) {
        println!("=== Compression ===");
        println!(
            "{} => {} bits ({:.2}x)",
            self.source_bits,
            self.compressed_bits,
            self.factor()
        );
        println!(
            "ensemble expected bits of info: {:.2}",
            expected_information_bits(self.source_bits, p)
        );
        println!("Verification: {outcome}");
    }
}

/// Outcome figures for one transmission trial.
#[derive(Debug, Clone, Copy)]
pub struct TransmissionStats {
    /// Source bytes before channel coding
    pub source_bytes: usize,

    /// Bytes actually pushed over the channel
    pub transmitted_bytes: usize,

    /// Bits the channel flipped
    pub bits_flipped: usize,

    /// Bytes still wrong after decoding
    pub residual_byte_errors: usize,
}

impl TransmissionStats {
    /// Expansion factor of the channel code (transmitted / source).
    pub fn expansion(&self) -> f64 {
        if self.source_bytes == 0 {
            0.0
        } else {
            self.transmitted_bytes as f64 / self.source_bytes as f64
        }
    }

    /// Share of source bytes still wrong after decoding.
    pub fn residual_error_rate(&self) -> f64 {
        if self.source_bytes == 0 {
            0.0
        } else {
            self.residual_byte_errors as f64 / self.source_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Transmission ===");
        println!(
            "{} bytes sent as {} ({:.1}x expansion)",
            self.source_bytes,
            self.transmitted_bytes,
            self.expansion()
        );
        println!("bits flipped by channel: {}", self.bits_flipped);
        println!(
            "residual byte errors after decode: {} ({:.3}%)",
            self.residual_byte_errors,
            self.residual_error_rate() * 100.0
        );
    }
}

/// Count bytes that differ between source and decoded output.
pub fn count_byte_errors(original: &[u8], decoded: &[u8]) -> usize {
    original
        .iter()
        .zip(decoded)
        .filter(|(a, b)| a != b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_extremes() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_symmetry() {
        assert!((binary_entropy(0.1) - binary_entropy(0.9)).abs() < 1e-12);
    }

    #[test]
    fn test_expected_information() {
        // H2(0.001) ~ 0.01141
        let bits = expected_information_bits(50_000, 0.001);
        assert!((bits - 570.4).abs() < 5.0, "got {bits}");
    }

    #[test]
    fn test_compression_factor() {
        let stats = CompressionStats {
            source_bits: 50_000,
            compressed_bits: 1_000,
        };
        assert_eq!(stats.factor(), 50.0);
        assert_eq!(stats.ratio(), 0.02);
    }

    #[test]
    fn test_transmission_rates() {
        let stats = TransmissionStats {
            source_bytes: 100,
            transmitted_bytes: 300,
            bits_flipped: 12,
            residual_byte_errors: 2,
        };
        assert_eq!(stats.expansion(), 3.0);
        assert_eq!(stats.residual_error_rate(), 0.02);
    }

    #[test]
    fn test_count_byte_errors() {
        assert_eq!(count_byte_errors(&[1, 2, 3], &[1, 0, 3]), 1);
        assert_eq!(count_byte_errors(&[1, 2], &[1, 2]), 0);
    }
}
