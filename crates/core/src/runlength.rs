//! Run-length delta codec for sparse binary sequences.
//!
//! Instead of storing every bit, the encoder stores the gap (delta)
//! between consecutive "event" bits. Each delta `d` is serialized as a
//! unary preamble of `len(bin(d))` zero bits followed by the binary
//! digits of `d`, most significant first. Because `d >= 1`, the leading
//! digit is always 1, which is what terminates the preamble.
//!
//! ```text
//! delta 1  -> 0 1
//! delta 5  -> 000 101
//! delta 12 -> 0000 1100
//! ```
//!
//! Which bit value counts as an event is selectable: a sequence that is
//! mostly zeros compresses its rare ones, and vice versa.

use crate::bits::BitSequence;
use crate::error::{Result, RunLengthError};

/// Which bit value is treated as the rare "event" to be delta-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventBit {
    /// 1 bits are events; the sequence is reconstructed over zeros.
    Ones,
    /// 0 bits are events; the sequence is reconstructed over ones.
    Zeros,
}

impl EventBit {
    fn event_value(self) -> u8 {
        match self {
            EventBit::Ones => 1,
            EventBit::Zeros => 0,
        }
    }

    fn fill_value(self) -> u8 {
        1 - self.event_value()
    }
}

/// One decoded run: the gap leading up to a single event bit.
///
/// Produced during encoding and kept only for diagnostics; decoding
/// works directly from the serialized deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBlock {
    /// First index covered by this run (one past the previous event)
    pub start: usize,
    /// Index of the event bit itself
    pub end: usize,
    /// Distance from the previous event (end - previous event index)
    pub delta: usize,
}

/// Encode a sequence as run-length deltas.
///
/// Returns the compressed bit stream together with the per-event
/// `RunBlock` metadata. A sequence with no event bits encodes to an
/// empty stream.
pub fn encode(seq: &BitSequence, events: EventBit) -> (BitSequence, Vec<RunBlock>) {
    let event = events.event_value();

    let mut blocks = Vec::new();
    let mut compressed = BitSequence::new();

    // last event index; -1 so the first delta is an absolute position + 1
    let mut last_event: isize = -1;

    for i in 0..seq.len() {
        if seq.get(i) != event {
            continue;
        }

        let delta = (i as isize - last_event) as usize;
        blocks.push(RunBlock {
            start: (last_event + 1) as usize,
            end: i,
            delta,
        });
        last_event = i as isize;

        write_delta(&mut compressed, delta);
    }

    (compressed, blocks)
}

/// Serialize one delta: unary length preamble, then binary digits.
fn write_delta(out: &mut BitSequence, delta: usize) {
    debug_assert!(delta >= 1);
    let digits = usize::BITS - delta.leading_zeros();

    for _ in 0..digits {
        out.push(0);
    }
    for shift in (0..digits).rev() {
        out.push(((delta >> shift) & 1) as u8);
    }
}

/// Decode a run-length stream back into a sequence of `n` bits.
///
/// The reader alternates between two modes: counting preamble zeros
/// (the digit count of the next delta), then reading that many digits.
/// The 1 bit that ends a preamble is also the first digit.
///
/// # Errors
/// - `RunLengthError::TruncatedDelta` if the stream ends mid-delta or
///   with a dangling preamble
/// - `RunLengthError::EventPastEnd` if the cumulative event index
///   reaches `n` before the stream is exhausted
pub fn decode(compressed: &BitSequence, n: usize, events: EventBit) -> Result<BitSequence> {
    let mut deltas: Vec<usize> = Vec::new();

    // digits still owed to the current delta; 0 means preamble mode
    let mut pending = 0usize;
    let mut current = 0usize;
    let mut in_preamble = true;

    for (position, bit) in compressed.iter().enumerate() {
        if in_preamble {
            if bit == 0 {
                pending += 1;
                continue;
            }
            if pending == 0 {
                return Err(RunLengthError::MissingPreamble { position }.into());
            }
            if pending >= usize::BITS as usize {
                return Err(RunLengthError::OversizedDelta { digits: pending }.into());
            }
            // the terminating 1 doubles as the first digit
            in_preamble = false;
            current = 0;
        }

        current = (current << 1) | bit as usize;
        pending -= 1;
        if pending == 0 {
            deltas.push(current);
            in_preamble = true;
        }
    }

    if !in_preamble || pending > 0 {
        return Err(RunLengthError::TruncatedDelta {
            missing_bits: pending,
        }
        .into());
    }

    let mut bits = vec![events.fill_value(); n];
    let mut cumulative: isize = -1;
    for delta in deltas {
        cumulative = cumulative
            .checked_add(delta as isize)
            .ok_or(RunLengthError::EventPastEnd { index: usize::MAX, len: n })?;
        let index = cumulative as usize;
        if index >= n {
            return Err(RunLengthError::EventPastEnd { index, len: n }.into());
        }
        bits[index] = events.event_value();
    }

    Ok(BitSequence::from_bits(&bits))
}
