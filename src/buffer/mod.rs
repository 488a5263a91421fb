//! Internal buffer management for pull-based sources.
//!
//! This module provides a thread-local pool of read scratch buffers so that
//! opening many short chunking sessions does not allocate one per session.
//! It is an implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
