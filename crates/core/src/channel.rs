//! Binary symmetric channel simulator.
//!
//! Models a noisy transmission line that flips each bit independently
//! with probability `f`. Corruption works byte-at-a-time: for every
//! source byte one noise byte is drawn (8 independent Bernoulli(f) bits)
//! and XORed in. The noise mask is returned alongside the corrupted data
//! so diagnostics can show exactly which bits flipped; decoders never see
//! it.
//!
//! # Determinism
//!
//! All randomness comes from a seeded ChaCha8 RNG. Given the same seed,
//! flip rate, and input, the output is bit-identical.

use crate::error::{ParameterError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration for the binary symmetric channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Per-bit flip probability [0.0, 1.0]
    pub flip_rate: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never flips anything.
    pub fn noiseless(seed: u64) -> Self {
        Self {
            flip_rate: 0.0,
            seed,
        }
    }
}

/// Result of one pass through the channel.
#[derive(Debug, Clone)]
pub struct Corrupted {
    /// The transmitted data with noise applied
    pub data: Vec<u8>,

    /// One noise byte per data byte; set bits are the flipped positions
    pub noise_mask: Vec<u8>,
}

impl Corrupted {
    /// Total number of bits the channel flipped.
    pub fn bits_flipped(&self) -> usize {
        self.noise_mask.iter().map(|b| b.count_ones() as usize).sum()
    }
}

/// Binary symmetric channel with per-bit flip probability.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread or synchronize externally.
pub struct BinarySymmetricChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    bytes_transmitted: u64,
    bits_flipped: u64,
}

impl BinarySymmetricChannel {
    /// Create a channel from a configuration.
    ///
    /// # Errors
    /// `ParameterError::ProbabilityOutOfRange` if `flip_rate` is outside
    /// [0, 1].
    pub fn new(config: ChannelConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.flip_rate) {
            return Err(ParameterError::ProbabilityOutOfRange {
                name: "f",
                value: config.flip_rate,
            }
            .into());
        }

        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bytes_transmitted: 0,
            bits_flipped: 0,
        })
    }

    /// Transmit a buffer, flipping each bit with probability `flip_rate`.
    ///
    /// Consumes randomness even for bits that do not flip, so two
    /// channels with the same seed stay in lockstep regardless of
    /// outcome.
    pub fn corrupt(&mut self, data: &[u8]) -> Corrupted {
        let f = self.config.flip_rate;
        let mut corrupted = Vec::with_capacity(data.len());
        let mut noise_mask = Vec::with_capacity(data.len());

        for &byte in data {
            let mut noise = 0u8;
            for bit in 0..8 {
                let roll: f64 = self.rng.gen();
                if roll < f {
                    noise |= 1 << bit;
                }
            }
            noise_mask.push(noise);
            corrupted.push(byte ^ noise);
        }

        self.bytes_transmitted += data.len() as u64;
        self.bits_flipped += noise_mask.iter().map(|b| b.count_ones() as u64).sum::<u64>();

        Corrupted {
            data: corrupted,
            noise_mask,
        }
    }

    /// Get statistics about channel behavior so far.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            bytes_transmitted: self.bytes_transmitted,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy)]
pub struct ChannelStats {
    /// Total bytes pushed through the channel
    pub bytes_transmitted: u64,

    /// Total bits flipped across all transmissions
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed flip rate (flipped bits / transmitted bits).
    pub fn observed_flip_rate(&self) -> f64 {
        if self.bytes_transmitted == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / (self.bytes_transmitted * 8) as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noiseless_channel_is_identity() {
        let mut channel = BinarySymmetricChannel::new(ChannelConfig::noiseless(42)).unwrap();
        let data = vec![0xAB, 0xCD, 0x00, 0xFF];

        let out = channel.corrupt(&data);
        assert_eq!(out.data, data);
        assert_eq!(out.bits_flipped(), 0);
    }

    #[test]
    fn test_determinism() {
        let config = ChannelConfig {
            flip_rate: 0.1,
            seed: 12345,
        };
        let data: Vec<u8> = (0..=255).collect();

        let mut a = BinarySymmetricChannel::new(config).unwrap();
        let mut b = BinarySymmetricChannel::new(config).unwrap();

        let out_a = a.corrupt(&data);
        let out_b = b.corrupt(&data);

        assert_eq!(out_a.data, out_b.data);
        assert_eq!(out_a.noise_mask, out_b.noise_mask);
    }

    #[test]
    fn test_mask_matches_corruption() {
        let config = ChannelConfig {
            flip_rate: 0.25,
            seed: 7,
        };
        let mut channel = BinarySymmetricChannel::new(config).unwrap();
        let data = vec![0x55; 64];

        let out = channel.corrupt(&data);
        for ((&original, &received), &noise) in
            data.iter().zip(&out.data).zip(&out.noise_mask)
        {
            assert_eq!(original ^ noise, received);
        }
    }

    #[test]
    fn test_flip_rate_is_plausible() {
        let config = ChannelConfig {
            flip_rate: 0.5,
            seed: 42,
        };
        let mut channel = BinarySymmetricChannel::new(config).unwrap();
        let data = vec![0u8; 1000];

        let out = channel.corrupt(&data);
        let flipped = out.bits_flipped();

        // 8000 bits at 50%: expect roughly half, allow a wide band
        assert!((3000..5000).contains(&flipped), "flipped {flipped}");
    }

    #[test]
    fn test_always_flip() {
        let config = ChannelConfig {
            flip_rate: 1.0,
            seed: 1,
        };
        let mut channel = BinarySymmetricChannel::new(config).unwrap();

        let out = channel.corrupt(&[0x0F, 0xF0]);
        assert_eq!(out.data, vec![0xF0, 0x0F]);
    }

    #[test]
    fn test_invalid_flip_rate() {
        assert!(BinarySymmetricChannel::new(ChannelConfig {
            flip_rate: -0.01,
            seed: 0
        })
        .is_err());
        assert!(BinarySymmetricChannel::new(ChannelConfig {
            flip_rate: 1.01,
            seed: 0
        })
        .is_err());
    }

    #[test]
    fn test_stats_accumulate() {
        let config = ChannelConfig {
            flip_rate: 1.0,
            seed: 3,
        };
        let mut channel = BinarySymmetricChannel::new(config).unwrap();

        channel.corrupt(&[0x00; 10]);
        channel.corrupt(&[0x00; 10]);

        let stats = channel.stats();
        assert_eq!(stats.bytes_transmitted, 20);
        assert_eq!(stats.bits_flipped, 160);
        assert_eq!(stats.observed_flip_rate(), 1.0);
    }
}
