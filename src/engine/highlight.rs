//! Highlight composition for rendering passes.
//!
//! Several highlight categories can apply to the same index in one pass;
//! the compositor resolves them to **at most one** display category via a
//! strict, named priority order so rendering stays unambiguous. The
//! precedence is an ordered list of `(category, predicate)` rules
//! evaluated first-match-wins — a testable policy, not inline branching.

use serde::{Deserialize, Serialize};

use crate::trace::{SearchStep, SortStep};

/// A named visual state assignable to array indices for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    /// Element known to be in final position.
    Sorted,
    /// Element being swapped this step.
    Swapping,
    /// Element being compared this step.
    Comparing,
    /// Element bounding the live search window.
    Searching,
    /// Probed midpoint of the search window.
    Pivot,
    /// Located target (terminal overlay).
    Found,
}

/// Per-render category memberships over index space.
///
/// Recomputed fresh for every rendering pass from the current step; never
/// accumulated across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    /// Indices in final position.
    pub sorted: Vec<usize>,
    /// Indices being swapped.
    pub swapping: Vec<usize>,
    /// Indices being compared.
    pub comparing: Vec<usize>,
    /// Search window bounds.
    pub searching: Vec<usize>,
    /// Probed midpoint.
    pub pivot: Option<usize>,
    /// Located target.
    pub found: Option<usize>,
}

impl Highlights {
    /// No highlights at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Memberships for one sort step.
    #[must_use]
    pub fn from_sort_step(step: &SortStep) -> Self {
        Self {
            sorted: step.sorted.clone(),
            swapping: step.swapping.clone(),
            comparing: step.comparing.clone(),
            ..Self::default()
        }
    }

    /// Memberships for one search step: the window bounds plus the probed
    /// midpoint.
    #[must_use]
    pub fn from_search_step(step: &SearchStep) -> Self {
        Self {
            searching: vec![step.low, step.high],
            pivot: Some(step.mid),
            ..Self::default()
        }
    }

    /// Every index of an array of length `len` marked sorted (terminal
    /// frame of a completed sort).
    #[must_use]
    pub fn all_sorted(len: usize) -> Self {
        Self {
            sorted: (0..len).collect(),
            ..Self::default()
        }
    }

    /// Terminal overlay for a successful search. Not composed with the
    /// per-iteration categories: every other membership is empty.
    #[must_use]
    pub fn found_overlay(index: usize) -> Self {
        Self {
            found: Some(index),
            ..Self::default()
        }
    }

    /// Check that no category has any member.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.sorted.is_empty()
            && self.swapping.is_empty()
            && self.comparing.is_empty()
            && self.searching.is_empty()
            && self.pivot.is_none()
            && self.found.is_none()
    }
}

/// One precedence rule: a category and the membership predicate that
/// admits an index into it.
#[derive(Clone, Copy)]
pub struct HighlightRule {
    /// The category this rule assigns.
    pub kind: HighlightKind,
    applies: fn(&Highlights, usize) -> bool,
}

fn in_sorted(h: &Highlights, index: usize) -> bool {
    h.sorted.contains(&index)
}

fn in_swapping(h: &Highlights, index: usize) -> bool {
    h.swapping.contains(&index)
}

fn in_comparing(h: &Highlights, index: usize) -> bool {
    h.comparing.contains(&index)
}

fn in_searching(h: &Highlights, index: usize) -> bool {
    h.searching.contains(&index)
}

fn is_pivot(h: &Highlights, index: usize) -> bool {
    h.pivot == Some(index)
}

fn is_found(h: &Highlights, index: usize) -> bool {
    h.found == Some(index)
}

const SORT_RULES: &[HighlightRule] = &[
    HighlightRule {
        kind: HighlightKind::Sorted,
        applies: in_sorted,
    },
    HighlightRule {
        kind: HighlightKind::Swapping,
        applies: in_swapping,
    },
    HighlightRule {
        kind: HighlightKind::Comparing,
        applies: in_comparing,
    },
];

const SEARCH_RULES: &[HighlightRule] = &[
    HighlightRule {
        kind: HighlightKind::Searching,
        applies: in_searching,
    },
    HighlightRule {
        kind: HighlightKind::Pivot,
        applies: is_pivot,
    },
    HighlightRule {
        kind: HighlightKind::Found,
        applies: is_found,
    },
];

/// Ordered first-match-wins precedence over highlight categories.
///
/// Sort mode resolves `sorted > swapping > comparing`; search mode
/// resolves `searching > pivot`, with `found` admitted last so the
/// terminal overlay pass (where the per-iteration sets are empty) still
/// renders. An index matching no rule renders unhighlighted.
#[derive(Clone, Copy)]
pub struct HighlightPolicy {
    rules: &'static [HighlightRule],
}

impl HighlightPolicy {
    /// Precedence for sort playback.
    #[must_use]
    pub const fn sort() -> Self {
        Self { rules: SORT_RULES }
    }

    /// Precedence for search playback.
    #[must_use]
    pub const fn search() -> Self {
        Self {
            rules: SEARCH_RULES,
        }
    }

    /// Resolve the display category for one index: the first rule whose
    /// predicate admits the index wins.
    #[must_use]
    pub fn resolve(&self, highlights: &Highlights, index: usize) -> Option<HighlightKind> {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(highlights, index))
            .map(|rule| rule.kind)
    }

    /// Categories in precedence order, for display legends.
    #[must_use]
    pub fn kinds(&self) -> Vec<HighlightKind> {
        self.rules.iter().map(|rule| rule.kind).collect()
    }
}

impl std::fmt::Debug for HighlightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightPolicy")
            .field("kinds", &self.kinds())
            .finish()
    }
}
