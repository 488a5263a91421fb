//! aechunk
//!
//! Streaming Content-Defined Chunking (CDC) with the Asymmetric Extremum
//! (AE) algorithm.
//!
//! `aechunk` transforms a byte stream into content-defined chunks whose
//! boundaries depend only on nearby bytes, so an insertion or deletion only
//! disturbs the chunks around it. It is designed as a small, composable
//! primitive for:
//!
//! - delta synchronization
//! - deduplication
//! - backup systems
//! - content-addressable storage
//!
//! The crate intentionally:
//! - does NOT hash or fingerprint chunks
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//! - does NOT persist chunks
//!
//! It only does one thing: **Read bytes → yield chunks**
//!
//! # Algorithm
//!
//! From a target average size the configuration derives a window
//! (`avg / (e - 1)`) and a stride. The scan tracks the most extreme sample
//! (maximum or minimum, see [`Extremum`]) since the chunk start and cuts once
//! a full window passes without a strictly more extreme one. An optional
//! `max_size` caps every chunk.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use aechunk::{Chunker, ChunkConfig, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let chunker = Chunker::new(ChunkConfig::default())?;
//!
//!     for chunk in chunker.chunk(file) {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes at {}", chunk.len(), chunk.offset);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
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
//!         println!("chunk {}", chunk.data.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;

mod buffer; // internal (thread-local reuse)
mod cdc; // internal AE impl

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use chunker::{ChunkEngine, ChunkIter, Chunker, SliceChunks};
pub use config::{ChunkConfig, DEFAULT_AVG_CHUNK_SIZE, Extremum, MIN_AVG_CHUNK_SIZE};
pub use error::ChunkError;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
