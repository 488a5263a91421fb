//! Async stream adapter for chunking.
//!
//! This module provides asynchronous chunking using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! The stream drives the same [`ChunkEngine`] as the synchronous adapters,
//! so for identical input it yields identical chunks.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use aechunk::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), aechunk::ChunkError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::default())?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::debug;

use crate::buffer::Buffer;
use crate::chunk::Chunk;
use crate::chunker::ChunkEngine;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    ///
    /// Once a read fails the error is yielded and the stream ends.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        engine: ChunkEngine,
        buffer: Buffer,
        eof: bool,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    pub(crate) fn new(reader: R, engine: ChunkEngine) -> Self {
        Self {
            reader,
            engine,
            buffer: Buffer::take(),
            eof: false,
            finished: false,
        }
    }

    /// Returns the offset of the next chunk in the stream.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some(chunk) = this.engine.next_chunk(*this.eof) {
                return Poll::Ready(Some(Ok(chunk)));
            }

            if *this.eof {
                *this.finished = true;
                return Poll::Ready(None);
            }

            let buf = this.buffer.read_slice(this.engine.wanted());
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => {
                    debug!("read interrupted, retrying");
                }
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    debug!(offset = this.engine.offset(), "reader exhausted");
                    *this.eof = true;
                }
                Poll::Ready(Ok(n)) => {
                    this.engine.extend(this.buffer.filled(n));
                }
            }
        }
    }
}

impl<R> std::fmt::Debug for ChunkStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream")
            .field("engine", &self.engine)
            .field("eof", &self.eof)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Creates a chunk stream from an async reader.
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
/// use aechunk::{chunk_async, ChunkConfig};
///
/// let tokio_reader = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(tokio_reader.compat(), ChunkConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`ChunkError::InvalidConfig`] if the configuration does not
/// validate.
pub fn chunk_async<R: AsyncRead>(
    reader: R,
    config: ChunkConfig,
) -> Result<ChunkStream<R>, ChunkError> {
    Ok(ChunkStream::new(reader, ChunkEngine::new(config)?))
}
