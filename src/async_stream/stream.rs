//! Async stream adapter for validation.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use utf8stream::{validate_async, ValidatorConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), utf8stream::ValidateError> {
//!     let mut stream = validate_async(reader, ValidatorConfig::default());
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("valid block: {} bytes", block.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::config::ValidatorConfig;
use crate::error::ValidateError;
use crate::validator::Utf8Validator;

pin_project! {
    /// A stream that yields validated blocks from an async reader.
    ///
    /// Same semantics as [`BlockIter`](crate::BlockIter): each item is one
    /// read, yielded after validation; the first error ends the stream.
    pub struct BlockStream<R> {
        #[pin]
        reader: R,
        config: ValidatorConfig,
        validator: Utf8Validator,
        buffer: Vec<u8>,
        finished: bool,
    }
}

impl<R> BlockStream<R> {
    /// Creates a new block stream from an async reader.
    pub fn new(reader: R, config: ValidatorConfig) -> Self {
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
}

impl<R: AsyncRead> Stream for BlockStream<R> {
    type Item = Result<Bytes, ValidateError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        if this.buffer.is_empty() {
            if let Err(e) = this.config.validate() {
                *this.finished = true;
                return Poll::Ready(Some(Err(e)));
            }
            *this.buffer = vec![0u8; this.config.buffer_size()];
        }

        loop {
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    log::debug!("read failed after {} bytes: {}", this.validator.offset(), e);
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ValidateError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    return match this.validator.finish() {
                        Ok(_) => Poll::Ready(None),
                        Err(e) => Poll::Ready(Some(Err(e))),
                    };
                }
                Poll::Ready(Ok(n)) => {
                    let block = &this.buffer[..n];
                    if let Err(e) = this.validator.push(block) {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    return Poll::Ready(Some(Ok(Bytes::copy_from_slice(block))));
                }
            }
        }
    }
}

/// Creates a stream of validated blocks from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use utf8stream::{validate_async, ValidatorConfig};
///
/// let socket = tokio::net::TcpStream::connect("127.0.0.1:9000").await?;
/// let stream = validate_async(socket.compat(), ValidatorConfig::default());
/// ```
pub fn validate_async<R: AsyncRead>(reader: R, config: ValidatorConfig) -> BlockStream<R> {
    BlockStream::new(reader, config)
}
