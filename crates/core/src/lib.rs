//! coding-sim-core: two independent coding layers over binary data
//!
//! This library provides the core components for a learning-focused system
//! that demonstrates:
//! - Source coding: compressing a sparse Bernoulli bit stream
//!   (run-length delta coding and binary arithmetic coding)
//! - Channel coding: protecting bytes against random bit flips
//!   (repetition codes with majority vote, and an (8,4) nibble code
//!   with syndrome decoding)
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: packed bit sequences with bit-level access
//! - `source`: seeded Bernoulli bit generation
//! - `runlength`: run-length delta codec
//! - `arithmetic`: fixed-parameter binary arithmetic codec
//! - `channel`: binary symmetric channel simulator
//! - `repetition`: N-fold repetition code with majority-vote decoding
//! - `nibble`: single-error-correcting (8,4) nibble code
//! - `verify`: exact round-trip comparison
//! - `pipeline`: validated entry points tying the stages together
//! - `stats`: entropy and per-trial statistics
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and surfaced to the caller
//! - **Deterministic**: seeded randomness makes runs reproducible
//! - **Fresh buffers**: every stage returns new buffers, nothing is
//!   mutated in place, so each codec is testable in isolation
//! - **Decode failure is statistical**: an overwhelmed channel code
//!   returns its best-effort value silently; correctness is established
//!   after the fact by the verifier

pub mod arithmetic;
pub mod bits;
pub mod channel;
pub mod error;
pub mod nibble;
pub mod pipeline;
pub mod repetition;
pub mod runlength;
pub mod source;
pub mod stats;
pub mod verify;

// Re-export commonly used types
pub use bits::BitSequence;
pub use error::{Error, Result};
