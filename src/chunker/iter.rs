//! Session factory and pull-based adapters - Chunker, ChunkIter, SliceChunks.
//!
//! - [`Chunker`] - Validated configuration that opens chunking sessions
//! - [`ChunkIter`] - Iterator that yields chunks from a [`std::io::Read`] source
//! - [`SliceChunks`] - Iterator that yields zero-copy chunks of an in-memory buffer
//!
//! # Example
//!
//! ```no_run
//! use aechunk::{ChunkConfig, Chunker};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let chunker = Chunker::new(ChunkConfig::default())?;
//!
//! for chunk in chunker.chunk(file) {
//!     let chunk = chunk?;
//!     println!("Chunk: {} bytes", chunk.len());
//! }
//! # Ok::<(), aechunk::ChunkError>(())
//! ```

use std::io::{ErrorKind, Read};

use bytes::Bytes;
use tracing::debug;

use crate::buffer::Buffer;
use crate::cdc::{AeCdc, ScanState};
use crate::chunk::Chunk;
use crate::chunker::ChunkEngine;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Opens chunking sessions over buffers and byte sources.
///
/// A `Chunker` only holds a validated configuration, so it is `Copy` and can
/// be shared freely. Each call to [`chunk`](Chunker::chunk),
/// [`split`](Chunker::split) or [`engine`](Chunker::engine) starts an
/// independent session with its own state.
///
/// # Example
///
/// ```
/// use aechunk::{ChunkConfig, Chunker, Extremum};
/// use std::io::Cursor;
///
/// let data = vec![7u8; 10_000];
/// let chunker = Chunker::new(ChunkConfig::new(512, Extremum::Max, None)?)?;
///
/// let chunks: Vec<_> = chunker.chunk(Cursor::new(&data)).collect::<Result<_, _>>()?;
/// assert_eq!(chunks, chunker.chunk_bytes(data));
/// # Ok::<(), aechunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Creates a chunking iterator from a reader.
    ///
    /// The iterator reads lazily and yields chunks as boundaries are found.
    /// Reads interrupted by [`ErrorKind::Interrupted`] are retried; any other
    /// read error is yielded once and ends the iteration.
    pub fn chunk<R: Read>(self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, ChunkEngine::from_valid(self.config))
    }

    /// Creates an iterator over zero-copy chunks of an in-memory buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::Chunker;
    ///
    /// let chunker = Chunker::default();
    /// let mut chunks = chunker.split(&b"hello world"[..]);
    ///
    /// assert_eq!(chunks.next().map(|c| c.len()), Some(11));
    /// assert!(chunks.next().is_none());
    /// ```
    pub fn split(&self, data: impl Into<Bytes>) -> SliceChunks {
        SliceChunks::new(data.into(), &self.config)
    }

    /// Chunks an in-memory buffer.
    ///
    /// Equivalent to collecting [`Chunker::split`]. Chunk data is sliced
    /// from the input without copying.
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::Chunker;
    ///
    /// let chunker = Chunker::default();
    /// assert!(chunker.chunk_bytes(&b""[..]).is_empty());
    /// assert_eq!(chunker.chunk_bytes(&b"hello world"[..]).len(), 1);
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        self.split(data).collect()
    }

    /// Creates a push-driven session.
    pub fn engine(&self) -> ChunkEngine {
        ChunkEngine::from_valid(self.config)
    }

    /// Creates an async chunk stream from an async reader.
    #[cfg(feature = "async-io")]
    pub fn chunk_async<R: futures_io::AsyncRead>(
        self,
        reader: R,
    ) -> crate::async_stream::ChunkStream<R> {
        crate::async_stream::ChunkStream::new(reader, self.engine())
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkConfig::default(),
        }
    }
}

/// An iterator that yields chunks from a reader.
///
/// `ChunkIter` reads from a [`std::io::Read`] source until the session's
/// read window is filled or the source ends, then hands the buffered bytes
/// to the AE scanner. Completed chunks are split off the front and the rest
/// is carried over to the next call.
pub struct ChunkIter<R> {
    reader: R,
    engine: ChunkEngine,
    buffer: Buffer,
    eof: bool,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    fn new(reader: R, engine: ChunkEngine) -> Self {
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

    /// Consumes the iterator and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Performs one read into the carry, returning the number of bytes read.
    fn fill(&mut self) -> std::io::Result<usize> {
        let buf = self.buffer.read_slice(self.engine.wanted());
        let n = loop {
            match self.reader.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    debug!("read interrupted, retrying");
                }
                result => break result?,
            }
        };
        self.engine.extend(self.buffer.filled(n));
        Ok(n)
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(chunk) = self.engine.next_chunk(self.eof) {
                return Some(Ok(chunk));
            }

            if self.eof {
                self.finished = true;
                return None;
            }

            match self.fill() {
                Ok(0) => {
                    debug!(offset = self.engine.offset(), "reader exhausted");
                    self.eof = true;
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R> std::fmt::Debug for ChunkIter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkIter")
            .field("engine", &self.engine)
            .field("eof", &self.eof)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// An iterator over the chunks of an in-memory buffer.
///
/// Every chunk is a zero-copy slice of the original [`Bytes`].
#[derive(Debug, Clone)]
pub struct SliceChunks {
    data: Bytes,
    pos: usize,
    cdc: AeCdc,
}

impl SliceChunks {
    fn new(data: Bytes, config: &ChunkConfig) -> Self {
        Self {
            data,
            pos: 0,
            cdc: AeCdc::new(config),
        }
    }
}

impl Iterator for SliceChunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return None;
        }

        // The whole remainder is visible, so the window is always final.
        let len = self
            .cdc
            .find_cut_point(&mut ScanState::default(), rest, true)
            .unwrap_or(rest.len());

        let chunk = Chunk::new(self.data.slice(self.pos..self.pos + len), self.pos as u64);
        self.pos += len;
        Some(chunk)
    }
}

impl std::iter::FusedIterator for SliceChunks {}
