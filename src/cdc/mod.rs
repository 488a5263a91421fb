//! Content-Defined Chunking (CDC) implementations.
//!
//! This module contains the core algorithm for identifying chunk boundaries
//! based on content patterns rather than fixed sizes.
//!
//! - [`AeCdc`] - Asymmetric Extremum cut-point detection
//! - [`ScanState`] - Resumable progress of one scan

mod ae;

pub(crate) use ae::{AeCdc, ScanState};
