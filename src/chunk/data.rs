//! The Chunk type - represents a content-defined chunk.

use bytes::Bytes;
use std::fmt;

/// A content-defined chunk and its position in the original stream.
///
/// Chunks emitted by one session partition the input exactly: concatenated
/// in emission order they reproduce the original bytes.
///
/// # Example
///
/// ```
/// use aechunk::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk {
///     data: Bytes::from_static(b"hello world"),
///     offset: 0,
/// };
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 0..11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// The offset of the first byte in the original stream.
    pub offset: u64,
}

impl Chunk {
    /// Creates a new chunk at the given offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the start offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {})", self.len(), self.offset)
    }
}
