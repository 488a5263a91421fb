//! Configuration for chunking behavior.
//!
//! This module provides the types that configure how chunking is performed:
//!
//! - [`ChunkConfig`] - Target average size, extremum mode and optional ceiling
//! - [`Extremum`] - Whether boundaries follow local maxima or minima
//!
//! Every scan constant the AE algorithm needs is derived from the average
//! size alone, so a configuration is three numbers at most.
//!
//! # Example
//!
//! ```
//! use aechunk::{ChunkConfig, Extremum};
//!
//! // Explicit, validated configuration
//! let config = ChunkConfig::new(16 * 1024, Extremum::Max, Some(64 * 1024))?;
//! assert_eq!(config.window_size(), 9535);
//!
//! // Builder pattern on top of the defaults
//! let config = ChunkConfig::default()
//!     .with_avg_size(32 * 1024)
//!     .with_mode(Extremum::Min);
//! config.validate()?;
//!
//! # Ok::<(), aechunk::ChunkError>(())
//! ```

use std::f64::consts::E;

use crate::error::ChunkError;

/// Default average/target chunk size (256 KiB).
pub const DEFAULT_AVG_CHUNK_SIZE: usize = 256 * 1024;

/// Smallest average size that still leaves room for an initial extreme and a
/// non-degenerate window.
pub const MIN_AVG_CHUNK_SIZE: usize = 3;

/// Number of samples a window is normalized to before the scan stride grows
/// beyond a single byte.
const WIDTH_NORMALIZATION: f64 = 256.0;

/// Which local extreme of the sampled values marks a chunk boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extremum {
    /// Cut after a local maximum survives a full window.
    #[default]
    Max,

    /// Cut after a local minimum survives a full window.
    Min,
}

impl Extremum {
    /// Returns true if `candidate` strictly beats `current` under this mode.
    ///
    /// Ties never win, so the first occurrence of an extreme value is the one
    /// that is tracked.
    #[inline]
    pub fn is_more_extreme(self, candidate: u64, current: u64) -> bool {
        match self {
            Extremum::Max => candidate > current,
            Extremum::Min => candidate < current,
        }
    }
}

/// Configuration for Asymmetric Extremum content-defined chunking.
///
/// `ChunkConfig` holds the caller-facing knobs and derives the scan
/// parameters from them:
///
/// | parameter          | formula                                  |
/// |--------------------|------------------------------------------|
/// | `window_size`      | `round(avg_size / (e - 1))`              |
/// | `width`            | `round(window_size / 256)`, at least 1   |
/// | `min_size`         | `avg_size - window_size`, at least 0     |
/// | `min_chunk_size`   | `window_size + width`                    |
/// | `read_window`      | `max_size`, or `2 * avg_size` if unset   |
///
/// # Size Constraints
///
/// - `avg_size >= 3`
/// - `max_size >= avg_size` when a ceiling is set
///
/// Without a ceiling, chunk length is bounded only by the content: a
/// strictly monotonic input never lets the window elapse and stays a single
/// chunk.
///
/// # Example
///
/// ```
/// use aechunk::{ChunkConfig, Extremum};
///
/// let config = ChunkConfig::new(10, Extremum::Max, None)?;
/// assert_eq!(config.window_size(), 6);
/// assert_eq!(config.width(), 1);
/// assert_eq!(config.min_size(), 4);
/// assert_eq!(config.min_chunk_size(), 7);
/// assert_eq!(config.read_window(), 20);
/// # Ok::<(), aechunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    /// Average/target chunk size in bytes.
    avg_size: usize,

    /// Extremum the scan looks for.
    mode: Extremum,

    /// Optional hard ceiling on chunk size in bytes.
    max_size: Option<usize>,
}

impl ChunkConfig {
    /// Creates a new validated configuration.
    ///
    /// # Arguments
    ///
    /// * `avg_size` - Desired average chunk size in bytes (at least 3)
    /// * `mode` - Whether boundaries follow maxima or minima
    /// * `max_size` - Optional hard ceiling (at least `avg_size`)
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if:
    /// - `avg_size < 3`
    /// - `max_size` is set and smaller than `avg_size`
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::{ChunkConfig, Extremum};
    ///
    /// assert!(ChunkConfig::new(2, Extremum::Max, None).is_err());
    /// assert!(ChunkConfig::new(4096, Extremum::Max, Some(4095)).is_err());
    /// assert!(ChunkConfig::new(4096, Extremum::Min, Some(4096)).is_ok());
    /// ```
    pub fn new(
        avg_size: usize,
        mode: Extremum,
        max_size: Option<usize>,
    ) -> Result<Self, ChunkError> {
        if avg_size < MIN_AVG_CHUNK_SIZE {
            return Err(ChunkError::InvalidConfig {
                message: "avg_size must be at least 3",
            });
        }

        if let Some(max_size) = max_size {
            if max_size < avg_size {
                return Err(ChunkError::InvalidConfig {
                    message: "max_size cannot be smaller than avg_size",
                });
            }
        }

        Ok(Self {
            avg_size,
            mode,
            max_size,
        })
    }

    /// Sets the average/target chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`ChunkConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_avg_size(mut self, size: usize) -> Self {
        self.avg_size = size;
        self
    }

    /// Sets the extremum mode.
    pub fn with_mode(mut self, mode: Extremum) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the hard ceiling on chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`ChunkConfig::validate`]
    /// to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_max_size(1024 * 1024);
    /// assert_eq!(config.max_size(), Some(1024 * 1024));
    /// ```
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Removes the hard ceiling on chunk size.
    pub fn without_max_size(mut self) -> Self {
        self.max_size = None;
        self
    }

    /// Returns the average/target chunk size.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the extremum mode.
    pub fn mode(&self) -> Extremum {
        self.mode
    }

    /// Returns the hard ceiling on chunk size, if any.
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Returns the span, in bytes, a tracked extreme must survive before a cut.
    pub fn window_size(&self) -> usize {
        (self.avg_size as f64 / (E - 1.0)).round() as usize
    }

    /// Returns the scan stride in bytes.
    pub fn width(&self) -> usize {
        let width = (self.window_size() as f64 / WIDTH_NORMALIZATION).round() as usize;
        width.max(1)
    }

    /// Returns `avg_size - window_size`, saturating at zero.
    ///
    /// A final window no longer than `min_size + window_size` is emitted as a
    /// single chunk without scanning.
    pub fn min_size(&self) -> usize {
        self.avg_size.saturating_sub(self.window_size())
    }

    /// Returns the theoretical minimum length of every chunk but the last.
    pub fn min_chunk_size(&self) -> usize {
        self.window_size() + self.width()
    }

    /// Returns how many bytes a streaming session accumulates before scanning.
    pub fn read_window(&self) -> usize {
        self.max_size.unwrap_or(self.avg_size.saturating_mul(2))
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use aechunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_avg_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.avg_size, self.mode, self.max_size).map(|_| ())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            avg_size: DEFAULT_AVG_CHUNK_SIZE,
            mode: Extremum::Max,
            max_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.avg_size(), DEFAULT_AVG_CHUNK_SIZE);
        assert_eq!(config.mode(), Extremum::Max);
        assert_eq!(config.max_size(), None);
        assert_eq!(config.read_window(), 2 * DEFAULT_AVG_CHUNK_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_parameters() {
        let config = ChunkConfig::new(DEFAULT_AVG_CHUNK_SIZE, Extremum::Max, None).unwrap();
        assert_eq!(config.window_size(), 152_562);
        assert_eq!(config.width(), 596);
        assert_eq!(config.min_size(), 262_144 - 152_562);
        assert_eq!(config.min_chunk_size(), 152_562 + 596);

        let config = ChunkConfig::new(4096, Extremum::Min, None).unwrap();
        assert_eq!(config.window_size(), 2384);
        assert_eq!(config.width(), 9);
    }

    #[test]
    fn test_small_window_width_floors_to_one() {
        let config = ChunkConfig::new(171, Extremum::Max, None).unwrap();
        assert_eq!(config.window_size(), 100);
        assert_eq!(config.width(), 1);

        let config = ChunkConfig::new(3, Extremum::Max, None).unwrap();
        assert_eq!(config.window_size(), 2);
        assert_eq!(config.width(), 1);
        assert_eq!(config.min_size(), 1);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChunkConfig::default()
            .with_avg_size(8192)
            .with_mode(Extremum::Min)
            .with_max_size(32768);

        assert_eq!(config.avg_size(), 8192);
        assert_eq!(config.mode(), Extremum::Min);
        assert_eq!(config.max_size(), Some(32768));
        assert_eq!(config.read_window(), 32768);

        let config = config.without_max_size();
        assert_eq!(config.max_size(), None);
        assert_eq!(config.read_window(), 16384);
    }

    #[test]
    fn test_invalid_config_avg_too_small() {
        for avg in 0..MIN_AVG_CHUNK_SIZE {
            assert!(ChunkConfig::new(avg, Extremum::Max, None).is_err());
        }
        assert!(ChunkConfig::new(3, Extremum::Max, None).is_ok());
    }

    #[test]
    fn test_invalid_config_max_below_avg() {
        let result = ChunkConfig::new(512 * 1024, Extremum::Max, Some(511 * 1024));
        assert!(matches!(result, Err(ChunkError::InvalidConfig { .. })));

        let result = ChunkConfig::new(512 * 1024, Extremum::Max, Some(512 * 1024));
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_does_not_validate() {
        let config = ChunkConfig::default().with_avg_size(1024).with_max_size(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_sizes_do_not_overflow() {
        let config = ChunkConfig::new(usize::MAX / 2 + 1, Extremum::Max, None).unwrap();
        assert_eq!(config.read_window(), usize::MAX);
        assert!(config.min_size() + config.window_size() <= config.avg_size());

        let config = ChunkConfig::new(16, Extremum::Max, Some(usize::MAX)).unwrap();
        assert_eq!(config.read_window(), usize::MAX);
    }

    #[test]
    fn test_extremum_ordering_is_strict() {
        assert!(Extremum::Max.is_more_extreme(5, 4));
        assert!(!Extremum::Max.is_more_extreme(4, 4));
        assert!(!Extremum::Max.is_more_extreme(3, 4));

        assert!(Extremum::Min.is_more_extreme(3, 4));
        assert!(!Extremum::Min.is_more_extreme(4, 4));
        assert!(!Extremum::Min.is_more_extreme(5, 4));
    }
}
