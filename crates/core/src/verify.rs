//! Exact round-trip verification.
//!
//! Every trial in this system ends here: the decoders return best-effort
//! values even when the channel overwhelmed them, so equality with the
//! original is the only ground truth. Comparison fails fast, reporting
//! the first differing index and both values.

use crate::bits::BitSequence;

/// Outcome of comparing a decoded buffer against the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Buffers are identical
    Match,

    /// Buffers have different lengths; no element comparison was done
    LengthMismatch { expected: usize, actual: usize },

    /// First position where the buffers differ
    Mismatch {
        index: usize,
        expected: u8,
        actual: u8,
    },
}

impl VerifyOutcome {
    /// True when the decoded buffer reproduced the original exactly.
    pub fn is_match(&self) -> bool {
        matches!(self, VerifyOutcome::Match)
    }

    /// Index of the first mismatch, if any element-level mismatch exists.
    pub fn mismatch_index(&self) -> Option<usize> {
        match self {
            VerifyOutcome::Mismatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyOutcome::Match => write!(f, "decoded matches source"),
            VerifyOutcome::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected}, got {actual}")
            }
            VerifyOutcome::Mismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "mismatch at index {index}: expected {expected}, got {actual}"
            ),
        }
    }
}

/// Compare two bit sequences.
pub fn verify_bits(original: &BitSequence, decoded: &BitSequence) -> VerifyOutcome {
    if original.len() != decoded.len() {
        return VerifyOutcome::LengthMismatch {
            expected: original.len(),
            actual: decoded.len(),
        };
    }

    for i in 0..original.len() {
        let expected = original.get(i);
        let actual = decoded.get(i);
        if expected != actual {
            return VerifyOutcome::Mismatch {
                index: i,
                expected,
                actual,
            };
        }
    }

    VerifyOutcome::Match
}

/// Compare two byte buffers.
pub fn verify_bytes(original: &[u8], decoded: &[u8]) -> VerifyOutcome {
    if original.len() != decoded.len() {
        return VerifyOutcome::LengthMismatch {
            expected: original.len(),
            actual: decoded.len(),
        };
    }

    for (i, (&expected, &actual)) in original.iter().zip(decoded).enumerate() {
        if expected != actual {
            return VerifyOutcome::Mismatch {
                index: i,
                expected,
                actual,
            };
        }
    }

    VerifyOutcome::Match
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_bits() {
        let a = BitSequence::from_bits(&[1, 0, 1, 1]);
        let b = a.clone();
        assert!(verify_bits(&a, &b).is_match());
    }

    #[test]
    fn test_first_bit_mismatch_reported() {
        let a = BitSequence::from_bits(&[1, 0, 1, 1]);
        let b = BitSequence::from_bits(&[1, 0, 0, 0]);

        let outcome = verify_bits(&a, &b);
        assert_eq!(
            outcome,
            VerifyOutcome::Mismatch {
                index: 2,
                expected: 1,
                actual: 0
            }
        );
        assert_eq!(outcome.mismatch_index(), Some(2));
    }

    #[test]
    fn test_length_mismatch() {
        let a = BitSequence::from_bits(&[1, 0]);
        let b = BitSequence::from_bits(&[1]);

        let outcome = verify_bits(&a, &b);
        assert_eq!(
            outcome,
            VerifyOutcome::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(outcome.mismatch_index(), None);
    }

    #[test]
    fn test_bytes() {
        assert!(verify_bytes(&[1, 2, 3], &[1, 2, 3]).is_match());
        assert_eq!(
            verify_bytes(&[1, 2, 3], &[1, 9, 3]),
            VerifyOutcome::Mismatch {
                index: 1,
                expected: 2,
                actual: 9
            }
        );
    }

    #[test]
    fn test_empty_buffers_match() {
        assert!(verify_bytes(&[], &[]).is_match());
    }
}
