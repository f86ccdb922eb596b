//! Internal read buffer management.
//!
//! This module provides a thread-local buffer pool so repeated reader
//! validation does not allocate a fresh buffer each time. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
