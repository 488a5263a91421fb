//! Chunking sessions for processing byte streams.
//!
//! - [`ChunkEngine`] - Stateful session with `push()`/`finish()` API
//! - [`Chunker`] - Opens sessions over buffers, readers and async readers
//! - [`ChunkIter`] - Pull-based session over a [`std::io::Read`] source
//! - [`SliceChunks`] - Session over an in-memory buffer

mod engine;
mod iter;

pub use engine::ChunkEngine;
pub use iter::{ChunkIter, Chunker, SliceChunks};
