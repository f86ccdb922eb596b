//! Streaming validation on top of the state machine.
//!
//! - [`Utf8Validator`] - Stateful validator with `push()`/`finish()` API
//! - [`BlockIter`] - Iterator of validated blocks from a [`std::io::Read`]
//! - [`ValidatingReader`] - Pass-through [`std::io::Read`] adapter

mod engine;
mod iter;
mod reader;

pub use engine::Utf8Validator;
pub use iter::BlockIter;
pub use reader::ValidatingReader;
