//! Lead-byte dispatch table.
//!
//! At a code point boundary the next state depends only on the lead byte, so
//! the whole decision tree collapses into one 256-entry lookup computed at
//! compile time.

use super::state::{CONTINUATION_MAX, CONTINUATION_MIN, Utf8State};

/// Builds the `InSequence` state entered after a lead byte.
const fn sequence(remaining: u8, lower: u8, upper: u8) -> Utf8State {
    Utf8State::InSequence {
        remaining,
        lower,
        upper,
    }
}

/// Classifies a byte seen at a code point boundary.
///
/// Narrowed first-continuation ranges:
/// - `0xE0`: `[0xA0, 0xBF]`, rejects overlong 3-byte forms (< U+0800)
/// - `0xED`: `[0x80, 0x9F]`, rejects encoded surrogates U+D800..U+DFFF
/// - `0xF0`: `[0x90, 0xBF]`, rejects overlong 4-byte forms (< U+10000)
/// - `0xF4`: `[0x80, 0x8F]`, rejects code points above U+10FFFF
///
/// `0xC0`, `0xC1` and `0xF5..=0xFF` can never start a valid sequence and are
/// rejected together with stray continuation bytes.
const fn lead_state(byte: u8) -> Utf8State {
    match byte {
        0x00..=0x7F => Utf8State::Boundary,
        0xC2..=0xDF => sequence(1, CONTINUATION_MIN, CONTINUATION_MAX),
        0xE0 => sequence(2, 0xA0, CONTINUATION_MAX),
        0xE1..=0xEC | 0xEE..=0xEF => sequence(2, CONTINUATION_MIN, CONTINUATION_MAX),
        0xED => sequence(2, CONTINUATION_MIN, 0x9F),
        0xF0 => sequence(3, 0x90, CONTINUATION_MAX),
        0xF1..=0xF3 => sequence(3, CONTINUATION_MIN, CONTINUATION_MAX),
        0xF4 => sequence(3, CONTINUATION_MIN, 0x8F),
        _ => Utf8State::Invalid,
    }
}

const fn build_lead_table() -> [Utf8State; 256] {
    let mut table = [Utf8State::Invalid; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = lead_state(i as u8);
        i += 1;
    }
    table
}

/// State reached from [`Utf8State::Boundary`] for every possible byte.
pub(crate) static LEAD_TABLE: [Utf8State; 256] = build_lead_table();

#[cfg(test)]
mod tests {
    use super::*;

    fn remaining(byte: u8) -> Option<u8> {
        match LEAD_TABLE[byte as usize] {
            Utf8State::Boundary => Some(0),
            Utf8State::InSequence { remaining, .. } => Some(remaining),
            Utf8State::Invalid => None,
        }
    }

    #[test]
    fn test_ascii_stays_at_boundary() {
        for b in 0x00..=0x7Fu8 {
            assert_eq!(LEAD_TABLE[b as usize], Utf8State::Boundary);
        }
    }

    #[test]
    fn test_sequence_lengths() {
        for b in 0xC2..=0xDFu8 {
            assert_eq!(remaining(b), Some(1), "lead {:#04x}", b);
        }
        for b in 0xE0..=0xEFu8 {
            assert_eq!(remaining(b), Some(2), "lead {:#04x}", b);
        }
        for b in 0xF0..=0xF4u8 {
            assert_eq!(remaining(b), Some(3), "lead {:#04x}", b);
        }
    }

    #[test]
    fn test_invalid_leads() {
        for b in (0x80..=0xC1u8).chain(0xF5..=0xFF) {
            assert_eq!(remaining(b), None, "lead {:#04x}", b);
        }
    }

    #[test]
    fn test_narrowed_ranges() {
        assert_eq!(LEAD_TABLE[0xE0], sequence(2, 0xA0, 0xBF));
        assert_eq!(LEAD_TABLE[0xED], sequence(2, 0x80, 0x9F));
        assert_eq!(LEAD_TABLE[0xF0], sequence(3, 0x90, 0xBF));
        assert_eq!(LEAD_TABLE[0xF4], sequence(3, 0x80, 0x8F));
        assert_eq!(LEAD_TABLE[0xE1], sequence(2, 0x80, 0xBF));
        assert_eq!(LEAD_TABLE[0xF2], sequence(3, 0x80, 0xBF));
    }

    #[test]
    fn test_agrees_with_std_utf8_width() {
        // std only reports widths, so this checks the lengths for every lead
        // byte that std accepts in some valid string.
        for c in ['\u{7f}', '\u{80}', '\u{7ff}', '\u{800}', '\u{ffff}', '\u{10000}', '\u{10ffff}'] {
            let mut buf = [0u8; 4];
            let encoded = c.encode_utf8(&mut buf);
            let lead = encoded.as_bytes()[0];
            assert_eq!(remaining(lead), Some(encoded.len() as u8 - 1));
        }
    }
}
