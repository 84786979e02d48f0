//! Admissible start-time windows.
//!
//! # Time Model
//! Time slots are 1-based integers. A window is the half-open interval
//! `[start, end)` of start times an operation may take.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous range of admissible start times `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First admissible start time (inclusive).
    pub start: i64,
    /// One past the last admissible start time (exclusive).
    pub end: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of admissible start times, saturating at `usize::MAX`.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        usize::try_from(self.end.abs_diff(self.start)).unwrap_or(usize::MAX)
    }

    /// Whether the window admits no start time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `time` is an admissible start.
    #[inline]
    pub fn contains(&self, time: i64) -> bool {
        time >= self.start && time < self.end
    }

    /// Admissible start times in ascending order.
    pub fn times(&self) -> Range<i64> {
        self.start..self.end
    }

    /// Start times of this window that fall inside `[lo, hi)`.
    ///
    /// Returns an empty range when the band misses the window.
    #[inline]
    pub fn band(&self, lo: i64, hi: i64) -> Range<i64> {
        let start = self.start.max(lo);
        let end = self.end.min(hi);
        if end > start {
            start..end
        } else {
            start..start
        }
    }

    /// Position of `time` within the window.
    #[inline]
    pub fn offset_of(&self, time: i64) -> Option<usize> {
        if !self.contains(time) {
            return None;
        }
        usize::try_from(time.abs_diff(self.start)).ok()
    }
}
