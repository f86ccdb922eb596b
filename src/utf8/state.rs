//! The streaming UTF-8 state machine.
//!
//! [`Utf8State`] is a plain `Copy` value that records how much of the
//! current code point is still owed. Callers thread it through successive
//! [`Utf8State::advance`] calls, one per incoming chunk, and ask
//! [`Utf8State::is_complete`] once the stream ends.
//!
//! # Example
//!
//! ```
//! use utf8stream::Utf8State;
//!
//! // U+4F60 split across two network reads.
//! let state = Utf8State::new().advance(&[0xE4, 0xBD]);
//! assert!(!state.is_complete());
//! assert!(!state.is_invalid());
//!
//! let state = state.advance(&[0xA0]);
//! assert!(state.is_complete());
//! ```

use std::ops::RangeInclusive;

use super::table::LEAD_TABLE;

/// Smallest continuation byte.
pub const CONTINUATION_MIN: u8 = 0x80;

/// Largest continuation byte.
pub const CONTINUATION_MAX: u8 = 0xBF;

/// Position of a validator within the current code point.
///
/// - `Boundary`: everything consumed so far is complete, valid UTF-8
/// - `InSequence`: `remaining` continuation bytes are owed and the next one
///   must fall in `lower..=upper` (always inside `0x80..=0xBF`)
/// - `Invalid`: a violation was seen; terminal for the rest of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Utf8State {
    /// At a code point boundary.
    #[default]
    Boundary,

    /// Inside a multi-byte sequence.
    InSequence {
        /// Continuation bytes still expected (1..=3).
        remaining: u8,
        /// Inclusive lower bound for the next byte.
        lower: u8,
        /// Inclusive upper bound for the next byte.
        upper: u8,
    },

    /// The stream is not valid UTF-8.
    Invalid,
}

impl Utf8State {
    /// The state at the start of a stream.
    pub const fn new() -> Self {
        Utf8State::Boundary
    }

    /// Consumes one byte.
    #[inline]
    pub fn step(self, byte: u8) -> Self {
        match self {
            Utf8State::Boundary => LEAD_TABLE[byte as usize],
            Utf8State::InSequence {
                remaining,
                lower,
                upper,
            } => {
                if byte < lower || byte > upper {
                    Utf8State::Invalid
                } else if remaining == 1 {
                    Utf8State::Boundary
                } else {
                    // Only the first continuation byte is ever narrowed.
                    Utf8State::InSequence {
                        remaining: remaining - 1,
                        lower: CONTINUATION_MIN,
                        upper: CONTINUATION_MAX,
                    }
                }
            }
            Utf8State::Invalid => Utf8State::Invalid,
        }
    }

    /// Consumes a chunk of any length and returns the resulting state.
    ///
    /// Already-invalid states are returned as is without looking at `chunk`.
    /// Feeding a stream in one call or in many smaller calls always ends in
    /// the same state.
    #[must_use]
    #[inline]
    pub fn advance(self, chunk: &[u8]) -> Self {
        self.scan(chunk).0
    }

    /// Like [`advance`](Self::advance), but also reports how far the scan got.
    ///
    /// The second element is the number of bytes accepted. When the returned
    /// state is `Invalid` and `self` was not, it is the index of the byte that
    /// broke the sequence.
    pub(crate) fn scan(self, chunk: &[u8]) -> (Self, usize) {
        if self == Utf8State::Invalid {
            return (self, 0);
        }

        let mut state = self;
        let mut i = 0;
        while i < chunk.len() {
            if state == Utf8State::Boundary {
                // ASCII cannot change a boundary state; skip the whole run.
                match chunk[i..].iter().position(|b| !b.is_ascii()) {
                    Some(run) => i += run,
                    None => break,
                }
            }

            state = state.step(chunk[i]);
            if state == Utf8State::Invalid {
                return (state, i);
            }
            i += 1;
        }

        (state, chunk.len())
    }

    /// Returns true if the bytes consumed so far form complete, valid UTF-8.
    ///
    /// This is the end-of-stream check: a stream that stops in the middle of
    /// a multi-byte sequence is invalid even if every byte was acceptable.
    pub const fn is_complete(self) -> bool {
        matches!(self, Utf8State::Boundary)
    }

    /// Returns true once a violation has been seen.
    pub const fn is_invalid(self) -> bool {
        matches!(self, Utf8State::Invalid)
    }

    /// Number of continuation bytes still owed (0 at a boundary or when invalid).
    pub const fn bytes_remaining(self) -> u8 {
        match self {
            Utf8State::InSequence { remaining, .. } => remaining,
            _ => 0,
        }
    }

    /// The range the next byte must fall in, if mid-sequence.
    pub fn expected_range(self) -> Option<RangeInclusive<u8>> {
        match self {
            Utf8State::InSequence { lower, upper, .. } => Some(lower..=upper),
            _ => None,
        }
    }
}

/// Validates a complete in-memory buffer.
///
/// Same result as feeding `bytes` through [`Utf8State::advance`] in any
/// number of pieces and checking [`Utf8State::is_complete`].
///
/// ```
/// assert!(utf8stream::validate("héllo".as_bytes()));
/// assert!(!utf8stream::validate(&[0xED, 0xA0, 0x80]));
/// ```
pub fn validate(bytes: &[u8]) -> bool {
    Utf8State::new().advance(bytes).is_complete()
}
