//! Algorithm engine request/response contract.
//!
//! The algorithm engine is an external collaborator: given an array and
//! an algorithm name it computes the full step trace for one run. This
//! crate only consumes that contract; [`TraceProvider`] is the seam, and
//! the `http` feature supplies a client for engines speaking JSON over
//! HTTP.

use serde::{Deserialize, Serialize};

use crate::config::Algorithm;
use crate::error::VizResult;
use crate::trace::{SearchStep, SortStep};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpTraceProvider;

/// Request for a sorting trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    /// The input array, as generated.
    pub array: Vec<u32>,
    /// Which algorithm to trace.
    pub algorithm: Algorithm,
}

/// Response carrying a sorting trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResponse {
    /// The full ordered trace for one run.
    pub steps: Vec<SortStep>,
}

/// Request for a binary-search trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The input array, as generated (the engine sorts it).
    pub array: Vec<u32>,
    /// The value to locate.
    pub target: u32,
}

/// Response carrying a binary-search trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The engine-sorted copy of the input, which the bisection steps
    /// index into.
    pub sorted_array: Vec<u32>,
    /// The full ordered trace for one run.
    pub steps: Vec<SearchStep>,
}

/// Black-box interface to the algorithm engine.
pub trait TraceProvider {
    /// Compute a sorting trace for the request.
    ///
    /// # Errors
    ///
    /// Returns error if the engine is unreachable or answers with a
    /// non-success response.
    fn sort(&mut self, request: &SortRequest) -> VizResult<SortResponse>;

    /// Compute a binary-search trace for the request.
    ///
    /// # Errors
    ///
    /// Returns error if the engine is unreachable or answers with a
    /// non-success response.
    fn search(&mut self, request: &SearchRequest) -> VizResult<SearchResponse>;
}
