//! UTF-8 validation core.
//!
//! - [`Utf8State`] - Copyable state carried between chunks
//! - [`validate`] - One-shot check of a complete buffer

mod state;
mod table;

pub use state::{CONTINUATION_MAX, CONTINUATION_MIN, Utf8State, validate};
