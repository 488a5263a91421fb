//! Core chunking engine - ChunkEngine with streaming API.
//!
//! This module implements the push-based half of the stream adapter. It
//! owns everything one chunking session needs:
//!
//! - the carry: bytes received but not yet part of an emitted chunk
//! - the AE scan state for the chunk being built
//! - the offset of the next chunk in the original stream
//!
//! Callers feed bytes in any size with `push()` and call `finish()` when the
//! stream ends. The pull adapters ([`ChunkIter`](crate::ChunkIter) and the
//! async stream) drive the same engine, which is what keeps their
//! boundaries identical.
//!
//! # Example
//!
//! ```
//! use aechunk::{ChunkConfig, ChunkEngine, Extremum};
//!
//! let config = ChunkConfig::new(64, Extremum::Max, Some(256))?;
//! let mut engine = ChunkEngine::new(config)?;
//!
//! let mut chunks = engine.push(&b"first part of the stream"[..]);
//! chunks.extend(engine.push(&b", second part"[..]));
//! chunks.extend(engine.finish());
//!
//! let total: usize = chunks.iter().map(|c| c.len()).sum();
//! assert_eq!(total, 37);
//! # Ok::<(), aechunk::ChunkError>(())
//! ```

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::cdc::{AeCdc, ScanState};
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A push-driven chunking session.
///
/// `ChunkEngine` accepts bytes via `push()` and yields chunks as soon as the
/// AE scan can decide a boundary. Undecided bytes stay in the engine until
/// more input arrives or `finish()` is called.
///
/// # Determinism
///
/// Identical byte streams produce identical chunk boundaries, regardless of:
/// - How many bytes are pushed at once (1 byte vs 1MB)
/// - Number of `push()` calls
///
/// # Memory Considerations
///
/// With a `max_size` ceiling the engine never holds more than `max_size`
/// bytes after `push()` returns. Without one, a long run of monotonic input
/// keeps growing the current chunk.
#[derive(Debug)]
pub struct ChunkEngine {
    cdc: AeCdc,
    state: ScanState,
    carry: BytesMut,
    offset: u64,
    config: ChunkConfig,
}

impl ChunkEngine {
    /// Creates a new session with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Creates a session from a configuration that already validated.
    pub(crate) fn from_valid(config: ChunkConfig) -> Self {
        debug!(
            avg_size = config.avg_size(),
            mode = ?config.mode(),
            max_size = ?config.max_size(),
            window_size = config.window_size(),
            width = config.width(),
            min_size = config.min_size(),
            "starting chunking session"
        );

        Self {
            cdc: AeCdc::new(&config),
            state: ScanState::default(),
            carry: BytesMut::new(),
            offset: 0,
            config,
        }
    }

    /// Pushes data into the engine and returns every chunk it completes.
    ///
    /// Bytes that cannot be assigned to a chunk yet are kept internally and
    /// take part in the next `push()` or `finish()`.
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::{ChunkConfig, ChunkEngine, Extremum};
    ///
    /// let mut engine = ChunkEngine::new(ChunkConfig::new(10, Extremum::Max, None)?)?;
    ///
    /// // Flat input: the extreme at offset 1 is never beaten, so every
    /// // chunk ends as soon as the window elapses.
    /// let chunks = engine.push(&[0u8; 20][..]);
    /// assert_eq!(chunks.len(), 2);
    /// assert!(chunks.iter().all(|c| c.len() == 7));
    /// assert_eq!(engine.pending_len(), 6);
    /// # Ok::<(), aechunk::ChunkError>(())
    /// ```
    pub fn push(&mut self, data: impl AsRef<[u8]>) -> Vec<Chunk> {
        self.extend(data.as_ref());

        let mut chunks = Vec::new();
        while let Some(chunk) = self.next_chunk(false) {
            chunks.push(chunk);
        }
        chunks
    }

    /// Ends the stream and returns the remaining chunks.
    ///
    /// The last chunk may be shorter than the configured minimum: the stream
    /// simply ran out of bytes. Calling `finish()` again returns nothing until
    /// more data is pushed.
    pub fn finish(&mut self) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        while let Some(chunk) = self.next_chunk(true) {
            chunks.push(chunk);
        }
        chunks
    }

    /// Resets the engine state for a new stream.
    ///
    /// Clears scan state, pending data, and offset.
    pub fn reset(&mut self) {
        self.state.reset();
        self.carry.clear();
        self.offset = 0;
    }

    /// Returns the current offset in the stream.
    ///
    /// This is the byte position of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes waiting for a boundary decision.
    pub fn pending_len(&self) -> usize {
        self.carry.len()
    }

    /// Returns the configuration used by this engine.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Appends bytes to the carry without scanning.
    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.carry.extend_from_slice(data);
    }

    /// How many bytes a pull adapter should read next.
    ///
    /// Tops the carry up to the read window; once the carry already fills it
    /// (only possible without a ceiling), asks for another full window.
    pub(crate) fn wanted(&self) -> usize {
        let window = self.config.read_window();
        match window.saturating_sub(self.carry.len()) {
            0 => window,
            n => n,
        }
    }

    /// Emits the next chunk if its boundary can be decided.
    ///
    /// With `at_end` set the input is treated as exhausted, so any non-empty
    /// carry produces a chunk.
    pub(crate) fn next_chunk(&mut self, at_end: bool) -> Option<Chunk> {
        let len = self
            .cdc
            .find_cut_point(&mut self.state, &self.carry, at_end)?;
        self.state.reset();

        let chunk = Chunk::new(self.carry.split_to(len).freeze(), self.offset);
        self.offset += len as u64;

        trace!(offset = chunk.offset, len, "emitting chunk");
        Some(chunk)
    }
}

impl Default for ChunkEngine {
    fn default() -> Self {
        Self::from_valid(ChunkConfig::default())
    }
}
