//! Stateful validator with a streaming API.
//!
//! [`Utf8Validator`] wraps a [`Utf8State`] with the bookkeeping a protocol
//! layer needs around it:
//!
//! - `push()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `finish()` - Check the stream did not stop mid-sequence
//! - Byte offsets and a reason for the first violation
//! - An optional limit on the stream length
//!
//! # Example
//!
//! ```
//! use utf8stream::{Utf8Validator, ValidatorConfig};
//!
//! let mut validator = Utf8Validator::new(ValidatorConfig::default());
//!
//! // A text frame arriving in three pieces, splitting "é" in half.
//! validator.push(b"caf")?;
//! validator.push(&[0xC3])?;
//! validator.push(&[0xA9])?;
//!
//! assert_eq!(validator.finish()?, 5);
//! # Ok::<(), utf8stream::ValidateError>(())
//! ```

use std::io::Read;

use crate::buffer::Buffer;
use crate::config::ValidatorConfig;
use crate::error::{Utf8Error, ValidateError};
use crate::utf8::Utf8State;

use super::iter::BlockIter;

/// First failure of a stream, replayed on every later call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Utf8(Utf8Error),
    TooLarge { actual: u64, max: u64 },
}

impl From<Rejection> for ValidateError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Utf8(e) => ValidateError::InvalidUtf8(e),
            Rejection::TooLarge { actual, max } => ValidateError::StreamTooLarge { actual, max },
        }
    }
}

/// A validator for one logical stream at a time.
///
/// # Streaming API
///
/// - Call `push()` with data in any size (1 byte to megabytes)
/// - Call `finish()` when the stream ends
/// - A stream that failed keeps failing until `finish()` or `reset()`
///
/// # Determinism
///
/// The verdict and the reported error offset depend only on the bytes of the
/// stream, never on how they were split across `push()` calls. With a
/// `max_len` set, an invalid byte before the limit is reported ahead of the
/// length error. `StreamTooLarge::actual` is the length the crossing push
/// would have reached, so it does depend on the split.
///
/// # Memory
///
/// Nothing is buffered. The validator holds a [`Utf8State`], a byte offset
/// and the first rejection.
#[derive(Debug, Clone)]
pub struct Utf8Validator {
    state: Utf8State,
    offset: u64,
    rejection: Option<Rejection>,
    config: ValidatorConfig,
}

impl Utf8Validator {
    /// Creates a new validator with the given configuration.
    ///
    /// ```
    /// use utf8stream::{Utf8Validator, ValidatorConfig};
    ///
    /// let validator = Utf8Validator::new(ValidatorConfig::default().with_max_len(1 << 20));
    /// assert_eq!(validator.offset(), 0);
    /// ```
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            state: Utf8State::new(),
            offset: 0,
            rejection: None,
            config,
        }
    }

    fn reject(&mut self, rejection: Rejection) -> ValidateError {
        match rejection {
            Rejection::Utf8(e) => log::debug!("rejecting stream: {}", e),
            Rejection::TooLarge { actual, max } => {
                log::debug!("rejecting stream: {} bytes exceeds limit of {}", actual, max)
            }
        }
        self.rejection = Some(rejection);
        rejection.into()
    }

    /// Validates the next piece of the stream.
    ///
    /// Returns an error for the first byte that cannot continue valid UTF-8,
    /// or when the stream would exceed the configured `max_len`. Bytes up to
    /// the limit are validated first. After that
    /// every call returns the same error without looking at `data`.
    ///
    /// A stream that currently ends mid-sequence is not an error here; more
    /// bytes may still complete it. Use [`finish`](Self::finish) at the end.
    ///
    /// ```
    /// use utf8stream::Utf8Validator;
    ///
    /// let mut validator = Utf8Validator::default();
    /// assert!(validator.push(&[0xE4, 0xBD]).is_ok());
    /// assert!(validator.push(&[0x41]).is_err());
    /// assert!(validator.push(b"fine").is_err());
    /// ```
    pub fn push(&mut self, data: &[u8]) -> Result<(), ValidateError> {
        if let Some(rejection) = self.rejection {
            return Err(rejection.into());
        }

        let end = self.offset + data.len() as u64;
        let limit = self.config.max_len().filter(|&max| end > max);

        // Bytes up to the limit are validated before the length check.
        let scanned = match limit {
            Some(max) => &data[..(max - self.offset) as usize],
            None => data,
        };

        let (state, accepted) = self.state.scan(scanned);
        self.state = state;
        if state.is_invalid() {
            let err = Utf8Error::invalid_byte(self.offset + accepted as u64, scanned[accepted]);
            self.offset += accepted as u64;
            return Err(self.reject(Rejection::Utf8(err)));
        }

        self.offset += scanned.len() as u64;
        if let Some(max) = limit {
            return Err(self.reject(Rejection::TooLarge { actual: end, max }));
        }
        Ok(())
    }

    /// Ends the stream and returns its length in bytes.
    ///
    /// Fails if the stream was already rejected or stops inside a multi-byte
    /// sequence. Either way the validator is reset afterwards and can be
    /// reused for a new stream.
    ///
    /// ```
    /// use utf8stream::Utf8Validator;
    ///
    /// let mut validator = Utf8Validator::default();
    /// validator.push(&[0xF0, 0x9F, 0x98])?;
    /// assert!(validator.finish().is_err());
    ///
    /// validator.push(&[0xF0, 0x9F, 0x98, 0x80])?;
    /// assert_eq!(validator.finish()?, 4);
    /// # Ok::<(), utf8stream::ValidateError>(())
    /// ```
    pub fn finish(&mut self) -> Result<u64, ValidateError> {
        let result = self.end_of_stream();
        self.reset();
        result
    }

    /// End-of-stream check without the reset; a truncation is recorded as
    /// the stream's rejection.
    pub(crate) fn end_of_stream(&mut self) -> Result<u64, ValidateError> {
        if let Some(rejection) = self.rejection {
            return Err(rejection.into());
        }

        if !self.state.is_complete() {
            let err = Utf8Error::truncated(self.offset, self.state.bytes_remaining());
            return Err(self.reject(Rejection::Utf8(err)));
        }

        log::trace!("validated utf-8 stream of {} bytes", self.offset);
        Ok(self.offset)
    }

    /// Resets the validator for a new stream.
    ///
    /// Clears the state machine, the offset and any rejection.
    pub fn reset(&mut self) {
        self.state = Utf8State::new();
        self.offset = 0;
        self.rejection = None;
    }

    /// Validates everything `reader` produces as one stream.
    ///
    /// Uses a fresh validator with this validator's configuration; `self` is
    /// left untouched. Returns the stream length.
    ///
    /// ```
    /// use std::io::Cursor;
    /// use utf8stream::Utf8Validator;
    ///
    /// let validator = Utf8Validator::default();
    /// assert_eq!(validator.validate_reader(Cursor::new("grüße"))?, 7);
    /// # Ok::<(), utf8stream::ValidateError>(())
    /// ```
    pub fn validate_reader<R: Read>(&self, mut reader: R) -> Result<u64, ValidateError> {
        self.config.validate()?;

        let mut validator = Utf8Validator::new(self.config);
        let mut buffer = Buffer::take(self.config.buffer_size());

        loop {
            let n = match reader.read(buffer.as_mut_slice()) {
                Ok(0) => return validator.finish(),
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            validator.push(buffer.filled(n))?;
        }
    }

    /// Creates an iterator that yields validated blocks read from `reader`.
    ///
    /// See [`BlockIter`].
    pub fn blocks<R: Read>(self, reader: R) -> BlockIter<R> {
        BlockIter::new(reader, self.config)
    }

    /// Returns the current offset in the stream.
    ///
    /// This is the number of bytes accepted so far, or the position of the
    /// offending byte once rejected.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the underlying state machine value.
    pub fn state(&self) -> Utf8State {
        self.state
    }

    /// Returns true if the stream so far is complete, valid UTF-8.
    pub fn is_complete(&self) -> bool {
        self.rejection.is_none() && self.state.is_complete()
    }

    /// Returns true once the stream has been rejected.
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Returns the configuration used by this validator.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Utf8ErrorKind;
    use std::io::Cursor;

    #[test]
    fn test_push_empty() {
        let mut validator = Utf8Validator::default();
        assert!(validator.push(&[]).is_ok());
        assert_eq!(validator.finish().unwrap(), 0);
    }

    #[test]
    fn test_error_offset_across_pushes() {
        let mut validator = Utf8Validator::default();
        validator.push(b"abc").unwrap();
        validator.push(&[0xE0]).unwrap();

        let err = validator.push(&[0x9F, 0x80]).unwrap_err();
        let utf8 = *err.utf8_error().unwrap();
        assert_eq!(utf8.offset, 4);
        assert_eq!(utf8.kind, Utf8ErrorKind::InvalidByte { byte: 0x9F });
        assert_eq!(validator.offset(), 4);
        assert!(validator.is_rejected());
        assert!(validator.state().is_invalid());
    }

    #[test]
    fn test_rejection_is_replayed() {
        let mut validator = Utf8Validator::default();
        let first = validator.push(&[b'x', 0xFF]).unwrap_err();
        let second = validator.push(b"more").unwrap_err();
        assert_eq!(first.utf8_error(), second.utf8_error());
        assert_eq!(validator.offset(), 1);
    }

    #[test]
    fn test_finish_truncated() {
        let mut validator = Utf8Validator::default();
        validator.push(&[b'a', 0xF0, 0x9F]).unwrap();

        let err = validator.finish().unwrap_err();
        assert_eq!(err.utf8_error(), Some(&Utf8Error::truncated(3, 2)));

        // finish() resets.
        assert_eq!(validator.offset(), 0);
        assert!(!validator.is_rejected());
        assert!(validator.is_complete());
    }

    #[test]
    fn test_max_len() {
        let config = ValidatorConfig::default().with_max_len(4);
        let mut validator = Utf8Validator::new(config);
        validator.push(b"ab").unwrap();
        validator.push(b"cd").unwrap();

        match validator.push(b"e") {
            Err(ValidateError::StreamTooLarge { actual, max }) => {
                assert_eq!(actual, 5);
                assert_eq!(max, 4);
            }
            other => panic!("expected StreamTooLarge, got {:?}", other),
        }
        assert!(matches!(
            validator.finish(),
            Err(ValidateError::StreamTooLarge { .. })
        ));
    }

    #[test]
    fn test_max_len_checks_bytes_before_limit() {
        let config = ValidatorConfig::default().with_max_len(4);

        let mut validator = Utf8Validator::new(config);
        let err = validator.push(b"ab\xFFcde").unwrap_err();
        assert_eq!(err.utf8_error(), Some(&Utf8Error::invalid_byte(2, 0xFF)));
        assert_eq!(validator.offset(), 2);

        // A clean prefix is accepted up to the limit.
        let mut validator = Utf8Validator::new(config);
        assert!(matches!(
            validator.push(b"abcdef"),
            Err(ValidateError::StreamTooLarge { actual: 6, max: 4 })
        ));
        assert_eq!(validator.offset(), 4);
    }

    #[test]
    fn test_validate_reader() {
        let validator = Utf8Validator::new(ValidatorConfig::new(3).unwrap());
        let text = "ab\u{4f60}c\u{1f600}".repeat(10);
        assert_eq!(
            validator.validate_reader(Cursor::new(text.as_bytes())).unwrap(),
            text.len() as u64
        );

        let err = validator
            .validate_reader(Cursor::new(&[b'a', 0xE4, 0xBD][..]))
            .unwrap_err();
        assert_eq!(err.utf8_error(), Some(&Utf8Error::truncated(3, 1)));
    }

    #[test]
    fn test_validate_reader_rejects_bad_config() {
        let validator = Utf8Validator::new(ValidatorConfig::default().with_buffer_size(0));
        assert!(matches!(
            validator.validate_reader(Cursor::new(b"x")),
            Err(ValidateError::InvalidConfig { .. })
        ));
    }
}
