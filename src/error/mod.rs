//! Error types for aechunk.

use thiserror::Error;

/// Errors that can occur during chunking operations.
///
/// Reaching the end of the input is not an error: iterators and streams
/// simply yield `None`.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    ///
    /// The session that produced it yields no further chunks.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}
