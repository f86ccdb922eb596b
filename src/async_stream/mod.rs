//! Async streaming support for validation.
//!
//! This module validates input from any `futures-io::AsyncRead`, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes.
//!
//! - [`validate_async`] - Creates an async stream of validated blocks
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{BlockStream, validate_async};
