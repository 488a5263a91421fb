//! Asymmetric Extremum (AE) cut-point detection.
//!
//! AE tracks the most extreme sample seen since the start of the current
//! chunk. Every time a strictly more extreme sample shows up it becomes the
//! new reference; once `window_size` bytes pass without one, the chunk ends.
//! The window is asymmetric: it only extends to the right of the extreme.
//!
//! For large windows the scan compares `width`-byte sums instead of single
//! bytes, which keeps the number of comparisons per chunk roughly constant.
//!
//! The scanner is resumable. When it runs out of bytes on a window that is
//! not final it returns `None` and remembers where it stopped in
//! [`ScanState`]; the next call continues from there once more bytes have
//! been appended. Decisions are only taken on complete samples unless the
//! window is final, so the boundaries do not depend on how the input was
//! split into reads.

use crate::config::{ChunkConfig, Extremum};

/// Progress of a scan over the current (not yet emitted) chunk.
///
/// Offsets are relative to the start of the chunk. Reset after every cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ScanState {
    /// Offset of the tracked extreme sample.
    extreme_pos: usize,
    /// Sum of the `width` bytes at `extreme_pos`.
    extreme_value: u64,
    /// Next sample offset to evaluate; zero until the extreme is seeded.
    cursor: usize,
}

impl ScanState {
    /// Forgets all progress. Call after every emitted chunk.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_primed(&self) -> bool {
        self.cursor != 0
    }
}

/// Scan parameters derived once from a [`ChunkConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AeCdc {
    mode: Extremum,
    window_size: usize,
    width: usize,
    min_size: usize,
    max_size: Option<usize>,
}

impl AeCdc {
    /// Derives the scan parameters. The configuration must already be valid.
    pub(crate) fn new(config: &ChunkConfig) -> Self {
        Self {
            mode: config.mode(),
            window_size: config.window_size(),
            width: config.width(),
            min_size: config.min_size(),
            max_size: config.max_size(),
        }
    }

    /// Finds the end of the chunk that starts at `data[0]`.
    ///
    /// # Arguments
    ///
    /// * `state` - Scan progress carried across calls for the same chunk
    /// * `data` - Every byte buffered for this chunk so far
    /// * `at_end` - Whether the input ends after `data`
    ///
    /// # Returns
    ///
    /// `Some(len)` with the chunk length (`1..=data.len()`, never more than
    /// `max_size`), or `None` if more bytes are needed to decide. With
    /// `at_end` set, or once `max_size` bytes are buffered, the result is
    /// always `Some` for non-empty `data`.
    pub(crate) fn find_cut_point(
        &self,
        state: &mut ScanState,
        data: &[u8],
        at_end: bool,
    ) -> Option<usize> {
        if data.is_empty() {
            return None;
        }

        // A full ceiling-sized window is as final as end of input.
        let (view, is_final) = match self.max_size {
            Some(max_size) if data.len() >= max_size => (&data[..max_size], true),
            _ => (data, at_end),
        };
        let n = view.len();

        // Too short to ever trigger a boundary. Non-final windows wait so the
        // decision matches the one taken when the whole input is visible.
        if n <= self.min_size + self.window_size {
            return is_final.then_some(n);
        }

        let width = self.width;
        if !state.is_primed() {
            state.extreme_pos = width;
            state.extreme_value = self.sample(view, width);
            state.cursor = 2 * width;
        }

        while state.cursor < n {
            let i = state.cursor;
            if !is_final && i + width > n {
                return None;
            }

            let value = self.sample(view, i);
            if self.mode.is_more_extreme(value, state.extreme_value) {
                state.extreme_pos = i;
                state.extreme_value = value;
            } else if i >= state.extreme_pos + self.window_size {
                return Some(i);
            }

            state.cursor += width;
        }

        // Samples exhausted: either the ceiling or the end of input.
        is_final.then_some(n)
    }

    /// Sums the `width` bytes at `pos`, truncated at the end of `data`.
    #[inline]
    fn sample(&self, data: &[u8], pos: usize) -> u64 {
        let end = (pos + self.width).min(data.len());
        data[pos..end].iter().map(|&b| u64::from(b)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cdc(avg_size: usize, mode: Extremum, max_size: Option<usize>) -> AeCdc {
        AeCdc::new(&ChunkConfig::new(avg_size, mode, max_size).unwrap())
    }

    fn cut(cdc: &AeCdc, data: &[u8]) -> Option<usize> {
        cdc.find_cut_point(&mut ScanState::default(), data, true)
    }

    fn increasing() -> Vec<u8> {
        let mut data = vec![0u8; 260];
        for i in 1..256 {
            data[4 + i] = i as u8;
        }
        data
    }

    #[test]
    fn test_empty_data_needs_more() {
        let cdc = cdc(10, Extremum::Max, None);
        assert_eq!(cut(&cdc, &[]), None);
    }

    #[test]
    fn test_short_final_window_is_one_chunk() {
        // avg 10: min_size 4 + window 6
        let cdc = cdc(10, Extremum::Max, None);
        for len in 1..=10 {
            assert_eq!(cut(&cdc, &vec![0u8; len]), Some(len));
        }
    }

    #[test]
    fn test_short_window_waits_when_not_final() {
        let cdc = cdc(10, Extremum::Max, None);
        let mut state = ScanState::default();
        assert_eq!(cdc.find_cut_point(&mut state, &[0u8; 10], false), None);
        assert_eq!(state, ScanState::default());
    }

    #[test]
    fn test_window_elapses_on_flat_input() {
        // Extreme seeded at offset 1; flat data never beats it, so the cut
        // lands at 1 + window_size.
        let max = cdc(10, Extremum::Max, None);
        assert_eq!(cut(&max, &[0u8; 20]), Some(7));

        let min = cdc(10, Extremum::Min, None);
        assert_eq!(cut(&min, &[0xFFu8; 20]), Some(7));
    }

    #[test]
    fn test_first_extreme_wins_ties() {
        let cdc = cdc(10, Extremum::Max, None);
        let mut data = vec![0u8; 16];
        data[1] = 5;
        data[7] = 5;
        // A tie at offset 7 does not move the extreme, so the window elapses there.
        assert_eq!(cut(&cdc, &data), Some(7));

        data[7] = 6;
        // A strictly larger value does; the window then elapses at 13.
        assert_eq!(cut(&cdc, &data), Some(13));
    }

    #[test]
    fn test_min_mode_ties() {
        let cdc = cdc(10, Extremum::Min, None);
        let mut data = vec![9u8; 16];
        data[1] = 1;
        data[7] = 1;
        assert_eq!(cut(&cdc, &data), Some(7));

        data[7] = 0;
        assert_eq!(cut(&cdc, &data), Some(13));
    }

    #[test]
    fn test_monotonic_input_never_cuts_without_ceiling() {
        let cdc = cdc(10, Extremum::Max, None);
        let data = increasing();
        assert_eq!(cut(&cdc, &data), Some(data.len()));
    }

    #[test]
    fn test_ceiling_forces_cut() {
        let cdc = cdc(10, Extremum::Max, Some(100));
        let data = increasing();
        let mut state = ScanState::default();
        // The ceiling makes the window final even without end of input.
        assert_eq!(cdc.find_cut_point(&mut state, &data, false), Some(100));
    }

    #[test]
    fn test_ceiling_equal_to_avg_size() {
        let cdc = cdc(10, Extremum::Max, Some(10));
        assert_eq!(cut(&cdc, &[0u8; 25]), Some(10));
    }

    #[test]
    fn test_wide_samples() {
        // avg 1000: window 582, width 2
        let cdc = cdc(1000, Extremum::Max, None);
        let data = vec![0x11u8; 2000];
        // Extreme at 2, window elapses at the first sample >= 584.
        assert_eq!(cut(&cdc, &data), Some(584));
    }

    #[test]
    fn test_tail_sample_deferred_until_final() {
        // avg 1000: window 582, width 2. The extreme settles at 510 and the
        // window would only elapse at 1092.
        let cdc = cdc(1000, Extremum::Max, None);
        let data: Vec<u8> = (0..1001usize).map(|i| (i / 2) as u8).collect();

        // Not final: the sample at 1000 is incomplete, so wait there.
        let mut state = ScanState::default();
        assert_eq!(cdc.find_cut_point(&mut state, &data, false), None);
        assert_eq!(state.cursor, 1000);
        // Final: the one-byte tail sample is evaluated.
        assert_eq!(cdc.find_cut_point(&mut state, &data, true), Some(1001));
    }

    #[test]
    fn test_resumed_scan_matches_single_pass() {
        let cdc = cdc(64, Extremum::Max, Some(256));
        let data: Vec<u8> = (0..4096u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();

        let expected = cut(&cdc, &data);
        assert!(expected.is_some());

        let mut state = ScanState::default();
        let mut found = None;
        for end in 1..=data.len() {
            found = cdc.find_cut_point(&mut state, &data[..end], false);
            if found.is_some() {
                break;
            }
        }
        assert_eq!(found, expected);
    }

    #[test]
    fn test_cut_respects_minimum_chunk_size() {
        let config = ChunkConfig::new(64, Extremum::Max, None).unwrap();
        let cdc = AeCdc::new(&config);
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();

        let mut pos = 0;
        while pos < data.len() {
            let len = cut(&cdc, &data[pos..]).unwrap();
            if pos + len < data.len() {
                assert!(len >= config.min_chunk_size());
            }
            pos += len;
        }
    }
}
