//! Error types for utf8stream.

use std::fmt;

/// Why a stream was judged invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utf8ErrorKind {
    /// A byte that cannot appear at this position.
    InvalidByte {
        /// The offending byte.
        byte: u8,
    },

    /// The stream ended inside a multi-byte sequence.
    Truncated {
        /// Continuation bytes that were still expected.
        missing: u8,
    },
}

/// Location and reason of the first UTF-8 violation in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Error {
    /// Stream offset of the offending byte, or the stream length for
    /// truncation.
    pub offset: u64,

    /// What went wrong.
    pub kind: Utf8ErrorKind,
}

impl Utf8Error {
    /// Creates an error for a byte that broke the grammar.
    pub const fn invalid_byte(offset: u64, byte: u8) -> Self {
        Self {
            offset,
            kind: Utf8ErrorKind::InvalidByte { byte },
        }
    }

    /// Creates an error for a stream that ended mid-sequence.
    pub const fn truncated(offset: u64, missing: u8) -> Self {
        Self {
            offset,
            kind: Utf8ErrorKind::Truncated { missing },
        }
    }

    /// Returns true if the stream ended in the middle of a multi-byte sequence.
    ///
    /// More input could have completed it; only the end of the stream made it
    /// an error.
    pub fn is_truncation(&self) -> bool {
        matches!(self.kind, Utf8ErrorKind::Truncated { .. })
    }
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Utf8ErrorKind::InvalidByte { byte } => {
                write!(f, "invalid utf-8 byte {:#04x} at offset {}", byte, self.offset)
            }
            Utf8ErrorKind::Truncated { missing } => write!(
                f,
                "truncated utf-8 sequence at offset {} ({} byte(s) missing)",
                self.offset, missing
            ),
        }
    }
}

impl std::error::Error for Utf8Error {}

/// Errors that can occur while validating a stream.
#[derive(Debug)]
pub enum ValidateError {
    /// An I/O error occurred while reading input data.
    Io(std::io::Error),

    /// The input is not valid UTF-8.
    InvalidUtf8(Utf8Error),

    /// The stream grew past the configured length limit.
    StreamTooLarge {
        /// Length the stream would have reached.
        actual: u64,
        /// The maximum allowed length.
        max: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl ValidateError {
    /// Returns the UTF-8 violation, if that is what this error is.
    pub fn utf8_error(&self) -> Option<&Utf8Error> {
        match self {
            ValidateError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateError::Io(e) => write!(f, "io error: {}", e),
            ValidateError::InvalidUtf8(e) => write!(f, "{}", e),
            ValidateError::StreamTooLarge { actual, max } => {
                write!(f, "stream too large: {} bytes (max {})", actual, max)
            }
            ValidateError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidateError::Io(e) => Some(e),
            ValidateError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ValidateError {
    fn from(e: std::io::Error) -> Self {
        ValidateError::Io(e)
    }
}

impl From<Utf8Error> for ValidateError {
    fn from(e: Utf8Error) -> Self {
        ValidateError::InvalidUtf8(e)
    }
}

impl From<ValidateError> for std::io::Error {
    fn from(e: ValidateError) -> Self {
        match e {
            ValidateError::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
