//! Thread-local pool of read scratch buffers.

use std::cell::RefCell;

/// Size of a pooled read buffer. Larger read windows are filled in several
/// reads.
pub const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable scratch buffer that reads land in before joining the carry.
#[derive(Debug)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.resize(READ_BUFFER_SIZE, 0);
        Self { data }
    }

    /// Returns a writable slice of at most `len` bytes, and at least one.
    pub fn read_slice(&mut self, len: usize) -> &mut [u8] {
        let len = len.clamp(1, self.data.len());
        &mut self.data[..len]
    }

    /// Returns the first `len` bytes.
    pub fn filled(&self, len: usize) -> &[u8] {
        &self.data[..len]
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        if data.capacity() <= READ_BUFFER_SIZE * 2 {
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(data);
                }
            });
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
