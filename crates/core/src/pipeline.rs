//! Validated entry points for complete trials.
//!
//! This is the surface a UI or CLI talks to: pick a compression method
//! or a channel code, hand over a buffer, get every intermediate stage
//! back. All parameters are checked here, before any codec runs, so the
//! codecs themselves never see out-of-range values.
//!
//! Each call constructs fresh buffers and returns them; nothing is
//! shared or mutated across calls.

use crate::arithmetic::ArithmeticCodec;
use crate::bits::BitSequence;
use crate::channel::{BinarySymmetricChannel, ChannelConfig};
use crate::error::{ParameterError, Result};
use crate::runlength::{self, EventBit, RunBlock};
use crate::{nibble, repetition::RepetitionCode};

/// Source-coding method selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Run-length delta coding of the chosen event bit
    RunLength(EventBit),

    /// Binary arithmetic coding with known parameter p
    Arithmetic { p: f64 },
}

/// Channel-coding selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSelector {
    /// Bytes go over the channel unprotected
    Passthrough,

    /// N copies of every byte, majority-vote decode
    Repetition(usize),

    /// (8,4) nibble code with syndrome decoding
    NibbleEcc,
}

impl CodeSelector {
    /// Resolve the numeric selector used by the configuration surface:
    /// 0 passthrough, 1-4 repetition x3/x5/x7/x9, 5 nibble code.
    ///
    /// # Errors
    /// `ParameterError::UnknownCodeSelector` for anything else.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(CodeSelector::Passthrough),
            1 => Ok(CodeSelector::Repetition(3)),
            2 => Ok(CodeSelector::Repetition(5)),
            3 => Ok(CodeSelector::Repetition(7)),
            4 => Ok(CodeSelector::Repetition(9)),
            5 => Ok(CodeSelector::NibbleEcc),
            other => Err(ParameterError::UnknownCodeSelector(other).into()),
        }
    }
}

/// A compressed sequence plus its diagnostic metadata.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// The compressed bit stream
    pub bits: BitSequence,

    /// Per-event run metadata (empty for arithmetic coding)
    pub runs: Vec<RunBlock>,
}

/// Every stage of one pass through the noisy channel.
#[derive(Debug, Clone)]
pub struct Transmission {
    /// Channel-coded bytes before noise
    pub encoded: Vec<u8>,

    /// The same bytes after the channel flipped bits
    pub corrupted: Vec<u8>,

    /// Best-effort decoder output
    pub decoded: Vec<u8>,

    /// Noise byte the channel applied per encoded byte
    pub noise_mask: Vec<u8>,
}

/// Compress a bit sequence with the chosen method.
///
/// # Errors
/// `ParameterError::EmptySequence` for an empty input, and the
/// arithmetic coder's parameter errors for a degenerate p.
pub fn compress(method: Method, seq: &BitSequence) -> Result<Compressed> {
    if seq.is_empty() {
        return Err(ParameterError::EmptySequence.into());
    }

    match method {
        Method::RunLength(events) => {
            let (bits, runs) = runlength::encode(seq, events);
            Ok(Compressed { bits, runs })
        }
        Method::Arithmetic { p } => {
            let codec = ArithmeticCodec::new(p)?;
            Ok(Compressed {
                bits: codec.encode(seq),
                runs: Vec::new(),
            })
        }
    }
}

/// Decompress a bit stream back into `n` bits.
///
/// The method and its parameters must match the ones used to compress;
/// this is a known-parameter system and no header is stored.
pub fn decompress(method: Method, compressed: &BitSequence, n: usize) -> Result<BitSequence> {
    if n == 0 {
        return Err(ParameterError::EmptySequence.into());
    }

    match method {
        Method::RunLength(events) => runlength::decode(compressed, n, events),
        Method::Arithmetic { p } => {
            let codec = ArithmeticCodec::new(p)?;
            Ok(codec.decode(compressed, n))
        }
    }
}

/// Run one buffer through encode -> noisy channel -> decode.
///
/// Returns every intermediate stage; the decoded buffer is best-effort
/// and must be checked against the source with the verifier.
pub fn transmit(
    code: CodeSelector,
    channel_config: ChannelConfig,
    source: &[u8],
) -> Result<Transmission> {
    let mut channel = BinarySymmetricChannel::new(channel_config)?;

    let encoded = match code {
        CodeSelector::Passthrough => source.to_vec(),
        CodeSelector::Repetition(n) => RepetitionCode::new(n)?.encode(source),
        CodeSelector::NibbleEcc => nibble::encode(source),
    };

    let corrupted = channel.corrupt(&encoded);

    let decoded = match code {
        CodeSelector::Passthrough => corrupted.data.clone(),
        CodeSelector::Repetition(n) => RepetitionCode::new(n)?.decode(&corrupted.data)?,
        CodeSelector::NibbleEcc => nibble::decode(&corrupted.data)?,
    };

    Ok(Transmission {
        encoded,
        corrupted: corrupted.data,
        decoded,
        noise_mask: corrupted.noise_mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;
    use crate::verify;

    #[test]
    fn test_compress_decompress_both_methods() {
        let seq = source::bernoulli(5_000, 0.01, 21).unwrap();

        for method in [
            Method::RunLength(EventBit::Ones),
            Method::RunLength(EventBit::Zeros),
            Method::Arithmetic { p: 0.01 },
        ] {
            let compressed = compress(method, &seq).unwrap();
            let decoded = decompress(method, &compressed.bits, seq.len()).unwrap();
            assert!(verify::verify_bits(&seq, &decoded).is_match(), "{method:?}");
        }
    }

    #[test]
    fn test_run_metadata_only_for_runlength() {
        let seq = source::bernoulli(1_000, 0.05, 5).unwrap();

        let rl = compress(Method::RunLength(EventBit::Ones), &seq).unwrap();
        assert_eq!(rl.runs.len(), seq.count_ones());

        let ac = compress(Method::Arithmetic { p: 0.05 }, &seq).unwrap();
        assert!(ac.runs.is_empty());
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(CodeSelector::from_id(0).unwrap(), CodeSelector::Passthrough);
        assert_eq!(CodeSelector::from_id(1).unwrap(), CodeSelector::Repetition(3));
        assert_eq!(CodeSelector::from_id(4).unwrap(), CodeSelector::Repetition(9));
        assert_eq!(CodeSelector::from_id(5).unwrap(), CodeSelector::NibbleEcc);
        assert!(CodeSelector::from_id(6).is_err());
    }

    #[test]
    fn test_transmit_noiseless_is_lossless() {
        let data: Vec<u8> = (0..=255).collect();
        let config = ChannelConfig::noiseless(42);

        for code in [
            CodeSelector::Passthrough,
            CodeSelector::Repetition(3),
            CodeSelector::NibbleEcc,
        ] {
            let result = transmit(code, config, &data).unwrap();
            assert!(verify::verify_bytes(&data, &result.decoded).is_match(), "{code:?}");
        }
    }

    #[test]
    fn test_transmit_stage_lengths() {
        let data = vec![0u8; 100];
        let config = ChannelConfig {
            flip_rate: 0.05,
            seed: 9,
        };

        let rep = transmit(CodeSelector::Repetition(5), config, &data).unwrap();
        assert_eq!(rep.encoded.len(), 500);
        assert_eq!(rep.corrupted.len(), 500);
        assert_eq!(rep.noise_mask.len(), 500);
        assert_eq!(rep.decoded.len(), 100);

        let ecc = transmit(CodeSelector::NibbleEcc, config, &data).unwrap();
        assert_eq!(ecc.encoded.len(), 200);
        assert_eq!(ecc.decoded.len(), 100);
    }

    #[test]
    fn test_invalid_parameters_rejected_at_boundary() {
        let seq = BitSequence::from_bits(&[1, 0, 1]);

        assert!(compress(Method::Arithmetic { p: 0.0 }, &seq).is_err());
        assert!(compress(Method::RunLength(EventBit::Ones), &BitSequence::new()).is_err());
        assert!(decompress(Method::Arithmetic { p: 0.5 }, &seq, 0).is_err());

        let bad_channel = ChannelConfig {
            flip_rate: 2.0,
            seed: 0,
        };
        assert!(transmit(CodeSelector::Passthrough, bad_channel, &[1, 2]).is_err());
    }
}
