//! Trace step records and their invariants.
//!
//! A trace is the full ordered sequence of steps the algorithm engine
//! produces for one run. It is computed once, immutable once received, and
//! replayable only by restarting from index 0 with a fresh fetch.
//!
//! Sort and search steps are two explicit record types rather than one
//! loosely-shaped record with optional members; each carries exactly the
//! fields its playback mode consumes.

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// One discrete moment in a sorting algorithm's execution trace.
///
/// `array` is the full array state *after* this step; the index sets name
/// the elements the step touched. Absent sets deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStep {
    /// Array state after this step.
    pub array: Vec<u32>,
    /// Indices being compared.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparing: Vec<usize>,
    /// Indices being swapped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swapping: Vec<usize>,
    /// Indices known to be in final position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorted: Vec<usize>,
}

/// One bisection step of a binary-search trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep {
    /// Lower bound of the live window.
    pub low: usize,
    /// Upper bound of the live window.
    pub high: usize,
    /// Probed midpoint.
    pub mid: usize,
    /// Whether the probe hit the target. Set on at most one step, and only
    /// the final one.
    #[serde(default)]
    pub found: bool,
}

/// Validate a sort trace against the original input length.
///
/// Checks, for every step:
/// - `array` has the same length as the original input;
/// - every index in `comparing` / `swapping` / `sorted` is in `[0, len)`.
///
/// # Errors
///
/// Returns [`VizError::MalformedTrace`] naming the first violation.
pub fn validate_sort_trace(steps: &[SortStep], len: usize) -> VizResult<()> {
    for (i, step) in steps.iter().enumerate() {
        if step.array.len() != len {
            return Err(VizError::malformed(format!(
                "step {i}: array length {} differs from input length {len}",
                step.array.len()
            )));
        }

        for (set_name, set) in [
            ("comparing", &step.comparing),
            ("swapping", &step.swapping),
            ("sorted", &step.sorted),
        ] {
            if let Some(index) = set.iter().find(|&&index| index >= len) {
                return Err(VizError::malformed(format!(
                    "step {i}: {set_name} index {index} out of range for length {len}"
                )));
            }
        }
    }

    Ok(())
}

/// Validate a search trace against the sorted array it bisects.
///
/// Checks, for every step, `low ≤ mid ≤ high < len`, and that a set
/// `found` flag appears only on the final step.
///
/// # Errors
///
/// Returns [`VizError::MalformedTrace`] naming the first violation.
pub fn validate_search_trace(steps: &[SearchStep], len: usize) -> VizResult<()> {
    let last = steps.len().checked_sub(1);

    for (i, step) in steps.iter().enumerate() {
        if !(step.low <= step.mid && step.mid <= step.high) {
            return Err(VizError::malformed(format!(
                "step {i}: window ordering broken (low {}, mid {}, high {})",
                step.low, step.mid, step.high
            )));
        }

        if step.high >= len {
            return Err(VizError::malformed(format!(
                "step {i}: high {} out of range for length {len}",
                step.high
            )));
        }

        if step.found && Some(i) != last {
            return Err(VizError::malformed(format!(
                "step {i}: found flag set before final step"
            )));
        }
    }

    Ok(())
}
