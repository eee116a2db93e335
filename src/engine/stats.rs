//! Running playback statistics.
//!
//! Counters are derived incrementally from step content and are
//! monotonically non-decreasing within one playback run; they are zeroed
//! at the start of every new run. No decrement path exists.

use serde::{Deserialize, Serialize};

use crate::trace::SortStep;

/// Running counters for one playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Element comparisons observed so far.
    pub comparisons: u64,
    /// Element swaps observed so far.
    pub swaps: u64,
    /// Array slot accesses observed so far.
    pub accesses: u64,
}

impl Stats {
    /// All counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparisons: 0,
            swaps: 0,
            accesses: 0,
        }
    }

    /// Accumulate the counts a single step contributes:
    /// `comparisons += |comparing|`, `swaps += |swapping|`,
    /// `accesses += |comparing| + 2·|swapping|` (a swap touches two slots
    /// per element pair).
    pub fn record(&mut self, step: &SortStep) {
        let comparing = step.comparing.len() as u64;
        let swapping = step.swapping.len() as u64;

        self.comparisons += comparing;
        self.swaps += swapping;
        self.accesses += comparing + 2 * swapping;
    }

    /// Zero all counters for a new run.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
