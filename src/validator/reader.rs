//! Pass-through [`Read`] adapter that validates what it hands out.

use std::io::{self, Read};

use crate::config::ValidatorConfig;

use super::engine::Utf8Validator;

/// Wraps a reader and fails the read that would return invalid UTF-8.
///
/// Bytes are passed through unchanged. A violation is reported as an
/// [`io::ErrorKind::InvalidData`] error wrapping a
/// [`ValidateError`](crate::ValidateError); a stream that ends mid-sequence
/// fails on the read that hits end of input. Once failed, every later read
/// fails the same way.
///
/// ```
/// use std::io::{Cursor, Read};
/// use utf8stream::ValidatingReader;
///
/// let mut text = String::new();
/// ValidatingReader::new(Cursor::new("ünïcödé")).read_to_string(&mut text)?;
/// assert_eq!(text, "ünïcödé");
///
/// let mut sink = Vec::new();
/// let err = ValidatingReader::new(Cursor::new(&b"\xFFbad"[..]))
///     .read_to_end(&mut sink)
///     .unwrap_err();
/// assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ValidatingReader<R> {
    inner: R,
    validator: Utf8Validator,
    eof: bool,
}

impl<R: Read> ValidatingReader<R> {
    /// Wraps `inner` with the default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ValidatorConfig::default())
    }

    /// Wraps `inner`, enforcing `config.max_len()` if set.
    pub fn with_config(inner: R, config: ValidatorConfig) -> Self {
        Self {
            inner,
            validator: Utf8Validator::new(config),
            eof: false,
        }
    }

    /// Returns the number of bytes validated so far.
    pub fn offset(&self) -> u64 {
        self.validator.offset()
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consumes the adapter, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ValidatingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.validator.is_rejected() {
            // Replays the stored rejection.
            self.validator.push(&[])?;
        }
        if self.eof || buf.is_empty() {
            return Ok(0);
        }

        let n = self.inner.read(buf)?;
        if n == 0 {
            self.validator.end_of_stream()?;
            self.eof = true;
            return Ok(0);
        }

        self.validator.push(&buf[..n])?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidateError;
    use std::io::Cursor;

    fn inner_error(err: &io::Error) -> &ValidateError {
        err.get_ref()
            .and_then(|e| e.downcast_ref::<ValidateError>())
            .expect("validation error")
    }

    #[test]
    fn test_pass_through() {
        let text = "x\u{a0}\u{4f60}\u{1f600}".repeat(100);
        let mut out = Vec::new();
        let mut reader = ValidatingReader::new(Cursor::new(text.as_bytes()));
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, text.as_bytes());
        assert_eq!(reader.offset(), text.len() as u64);
    }

    #[test]
    fn test_small_reads_split_sequences() {
        let text = "\u{1f600}\u{1f600}";
        let mut reader = ValidatingReader::new(Cursor::new(text.as_bytes()));
        let mut byte = [0u8; 1];
        for _ in 0..text.len() {
            assert_eq!(reader.read(&mut byte).unwrap(), 1);
        }
        assert_eq!(reader.read(&mut byte).unwrap(), 0);
    }

    #[test]
    fn test_truncation_reported_at_eof() {
        let mut reader = ValidatingReader::new(Cursor::new(&[b'a', 0xC3][..]));
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);

        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(inner_error(&err).utf8_error().unwrap().is_truncation());
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut reader = ValidatingReader::new(Cursor::new(&b"ok\xED\xA0\x80 tail"[..]));
        let mut buf = [0u8; 64];
        assert!(reader.read(&mut buf).is_err());
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(inner_error(&err).utf8_error().unwrap().offset, 3);
    }

    #[test]
    fn test_max_len() {
        let config = ValidatorConfig::default().with_max_len(3);
        let mut reader = ValidatingReader::with_config(Cursor::new(b"four"), config);
        let mut out = Vec::new();
        let err = reader.read_to_end(&mut out).unwrap_err();
        assert!(matches!(
            inner_error(&err),
            ValidateError::StreamTooLarge { actual: 4, max: 3 }
        ));
        assert_eq!(reader.into_inner().position(), 4);
    }
}
