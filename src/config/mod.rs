//! Configuration for stream validation.
//!
//! - [`ValidatorConfig`] - Read buffer size and stream length limit

use crate::error::ValidateError;

/// Default read buffer size (8 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Largest accepted read buffer size (16 MiB).
pub const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for streaming validation.
///
/// `buffer_size` only affects the reader and stream adapters; the state
/// machine itself never buffers. `max_len` caps the total length of one
/// logical stream, the way a message-based transport limits frame sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorConfig {
    buffer_size: usize,
    max_len: Option<u64>,
}

impl ValidatorConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if `buffer_size` is zero or above [`MAX_BUFFER_SIZE`].
    pub fn new(buffer_size: usize) -> Result<Self, ValidateError> {
        if buffer_size == 0 {
            return Err(ValidateError::InvalidConfig {
                message: "buffer size must be non-zero",
            });
        }

        if buffer_size > MAX_BUFFER_SIZE {
            return Err(ValidateError::InvalidConfig {
                message: "buffer size cannot exceed 16 MiB",
            });
        }

        Ok(Self {
            buffer_size,
            max_len: None,
        })
    }

    /// Sets the read buffer size.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the maximum stream length in bytes.
    pub fn with_max_len(mut self, max_len: u64) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Removes the stream length limit.
    pub fn without_max_len(mut self) -> Self {
        self.max_len = None;
        self
    }

    /// Returns the read buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the maximum stream length, if any.
    pub fn max_len(&self) -> Option<u64> {
        self.max_len
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ValidateError> {
        Self::new(self.buffer_size).map(|_| ())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_len: None,
        }
    }
}
