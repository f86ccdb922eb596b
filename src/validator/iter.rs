//! Block iterator over a [`std::io::Read`] source.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use utf8stream::{Utf8Validator, ValidatorConfig};
//!
//! let config = ValidatorConfig::new(4)?;
//! let reader = Cursor::new("streamed text");
//!
//! let mut text = Vec::new();
//! for block in Utf8Validator::new(config).blocks(reader) {
//!     text.extend_from_slice(&block?);
//! }
//! assert_eq!(text, b"streamed text");
//! # Ok::<(), utf8stream::ValidateError>(())
//! ```

use std::io::{ErrorKind, Read};

use bytes::Bytes;

use crate::config::ValidatorConfig;
use crate::error::ValidateError;

use super::engine::Utf8Validator;

/// An iterator that yields validated blocks from a reader.
///
/// Each item is one read of up to `buffer_size` bytes, returned only after it
/// has been validated. Blocks are not re-framed: a multi-byte sequence may
/// straddle two blocks. Concatenated, the blocks reproduce the input.
///
/// On the first violation (or an I/O error, or truncation at end of input)
/// the iterator yields that error and then ends.
pub struct BlockIter<R> {
    reader: R,
    config: ValidatorConfig,
    validator: Utf8Validator,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> BlockIter<R> {
    /// Creates a new block iterator.
    pub(crate) fn new(reader: R, config: ValidatorConfig) -> Self {
        Self {
            reader,
            config,
            validator: Utf8Validator::new(config),
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Returns the number of bytes validated so far.
    pub fn offset(&self) -> u64 {
        self.validator.offset()
    }

    /// Consumes the iterator, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for BlockIter<R> {
    type Item = Result<Bytes, ValidateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.buffer.is_empty() {
            if let Err(e) = self.config.validate() {
                self.finished = true;
                return Some(Err(e));
            }
            self.buffer = vec![0u8; self.config.buffer_size()];
        }

        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return match self.validator.finish() {
                        Ok(_) => None,
                        Err(e) => Some(Err(e)),
                    };
                }
                Ok(n) => {
                    let block = &self.buffer[..n];
                    if let Err(e) = self.validator.push(block) {
                        self.finished = true;
                        return Some(Err(e));
                    }
                    return Some(Ok(Bytes::copy_from_slice(block)));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("read failed after {} bytes: {}", self.validator.offset(), e);
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
