//! # algoviz
//!
//! Deterministic playback engine for step-by-step sorting and searching
//! visualizations.
//!
//! A remote algorithm engine computes a full trace of discrete steps for an
//! input array; this crate consumes that trace and replays it as a
//! controllable animation: play, pause, resume, reset, plus a slower-cadence
//! playback mode for binary search. Traces replay deterministically — one
//! step per scheduled tick, strictly in trace order — with running
//! statistics derived from step content and a first-match-wins highlight
//! policy per rendered element.
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//!
//! let config = VizConfig::builder()
//!     .seed(42)
//!     .size(16)
//!     .build();
//! let mut generator = ArrayGenerator::new(config.seed);
//! let array = generator.generate(config.size);
//! assert_eq!(array.len(), 16);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::missing_const_for_fn, // Many functions can't be const in stable Rust
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod render;
pub mod session;
pub mod trace;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{Algorithm, VizConfig, VizConfigBuilder};
    pub use crate::engine::generator::ArrayGenerator;
    pub use crate::engine::highlight::{HighlightKind, HighlightPolicy, Highlights};
    pub use crate::engine::playback::{Phase, PlaybackEngine, Tick};
    pub use crate::engine::search::{SearchOutcome, SearchPlayback, SearchTick};
    pub use crate::engine::stats::Stats;
    pub use crate::error::{VizError, VizResult};
    pub use crate::render::{FrameStore, RenderFrame, RenderGateway};
    pub use crate::session::VizSession;
    pub use crate::trace::{SearchStep, SortStep};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
