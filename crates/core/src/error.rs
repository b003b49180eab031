//! Error types for the coding-sim system.
//!
//! All operations return structured errors rather than panicking.
//!
//! Two taxonomies exist by design:
//! - Parameter errors: out-of-range probabilities, bad lengths, unknown
//!   code selectors. Rejected at the boundary before any codec runs.
//! - Stream/shape errors: a compressed or encoded buffer that cannot be
//!   decoded (truncated delta, wrong block length).
//!
//! Failed error *correction* (too many flipped bits for the chosen code)
//! is deliberately NOT an error: the channel decoders return their
//! best-effort value and the verifier discovers the damage afterward.

use thiserror::Error;

/// Top-level error type for all operations in the system.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid caller-supplied parameter (p, f, n, code selector)
    #[error("invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    /// Malformed run-length stream
    #[error("run-length decode error: {0}")]
    RunLength(#[from] RunLengthError),

    /// Channel-code buffer has the wrong shape for decoding
    #[error("block code error: {0}")]
    BlockCode(#[from] BlockCodeError),
}

/// Parameter validation errors, raised before any computation.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// A probability argument is outside [0, 1]
    #[error("probability `{name}` must be in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    /// The arithmetic coder needs p strictly inside (0, 1); p = 0 or
    /// p = 1 collapses the coding interval
    #[error("arithmetic coding requires p in (0, 1), got {value}")]
    DegenerateProbability { value: f64 },

    /// Sequence length must be positive
    #[error("sequence length must be > 0")]
    EmptySequence,

    /// Numeric code selector outside the supported set
    #[error("unknown code selector {0} (supported: 0-5)")]
    UnknownCodeSelector(u8),

    /// Repetition count outside the supported set
    #[error("unsupported repetition count {0} (supported: 1, 2, 3, 5, 7, 9)")]
    UnsupportedRepeats(usize),

    /// Arithmetic coder register tuning outside its valid range
    #[error("arithmetic tuning `{name}` = {value} must be in [{min}, {max}]")]
    TuningOutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Errors while decoding a run-length compressed stream.
#[derive(Debug, Error)]
pub enum RunLengthError {
    /// Stream ended in the middle of a delta's binary digits
    #[error("truncated delta: stream ended {missing_bits} bits early")]
    TruncatedDelta { missing_bits: usize },

    /// A delta started with no unary length preamble before its 1 bit
    #[error("delta at bit {position} has an empty length preamble")]
    MissingPreamble { position: usize },

    /// A preamble promises more digits than any index could need
    #[error("delta of {digits} digits exceeds supported width")]
    OversizedDelta { digits: usize },

    /// A decoded delta places an event at or past the declared length
    #[error("event index {index} out of range for sequence of {len} bits")]
    EventPastEnd { index: usize, len: usize },
}

/// Errors while decoding a channel-coded byte buffer.
#[derive(Debug, Error)]
pub enum BlockCodeError {
    /// Repetition decode needs a length divisible by the repeat count
    #[error("buffer length {len} is not a multiple of {repeats} repeats")]
    LengthNotMultiple { len: usize, repeats: usize },

    /// Nibble code emits two bytes per source byte, so input must be even
    #[error("nibble code buffer length {len} is odd")]
    OddLength { len: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
