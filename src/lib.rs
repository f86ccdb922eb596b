//! utf8stream
//!
//! Streaming UTF-8 validation for Rust.
//!
//! `utf8stream` decides whether a byte stream is valid UTF-8 while it is still
//! arriving, one chunk at a time, without ever buffering it. It is designed as
//! a small, composable primitive for:
//!
//! - text frames on message-based transports (WebSocket and friends)
//! - input sanitization before bytes are handed on as text
//! - validating files or pipes too large to hold in memory
//!
//! The crate intentionally:
//! - does NOT decode or transcode
//! - does NOT re-frame or buffer input
//! - does NOT decide what to do with invalid streams
//!
//! It only does one thing: **Bytes in → valid or not out**
//!
//! # State machine
//!
//! ```
//! use utf8stream::Utf8State;
//!
//! let mut state = Utf8State::new();
//! for piece in [&b"caf"[..], &[0xC3][..], &[0xA9][..]] {
//!     state = state.advance(piece);
//! }
//! assert!(state.is_complete());
//! ```
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use utf8stream::{Utf8Validator, ValidateError};
//!
//! fn main() -> Result<(), ValidateError> {
//!     let file = File::open("notes.txt")?;
//!     let len = Utf8Validator::default().validate_reader(file)?;
//!     println!("{} bytes of valid UTF-8", len);
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use utf8stream::{validate_async, ValidatorConfig};
//!
//! async fn demo<R: futures_io::AsyncRead + Unpin>(reader: R) -> Result<(), utf8stream::ValidateError> {
//!     let mut stream = validate_async(reader, ValidatorConfig::default());
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("block {}", block.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod utf8;
mod validator;

mod buffer; // internal (thread-local reuse)

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE, ValidatorConfig};
pub use error::{Utf8Error, Utf8ErrorKind, ValidateError};
pub use utf8::{CONTINUATION_MAX, CONTINUATION_MIN, Utf8State, validate};
pub use validator::{BlockIter, Utf8Validator, ValidatingReader};

#[cfg(feature = "async-io")]
pub use async_stream::{BlockStream, validate_async};
