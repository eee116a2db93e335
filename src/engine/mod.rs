//! Core playback engine.
//!
//! Implements the step-consuming state machines with:
//! - Deterministic array generation (seeded PCG)
//! - Cooperative tick scheduling via pending-tick handles
//! - Running statistics derived from step content
//! - First-match-wins highlight composition

pub mod generator;
pub mod highlight;
pub mod playback;
pub mod search;
pub mod stats;

pub use generator::ArrayGenerator;
pub use highlight::{HighlightKind, HighlightPolicy, Highlights};
pub use playback::{PendingTick, Phase, PlaybackEngine, Tick};
pub use search::{SearchOutcome, SearchPlayback, SearchTick};
pub use stats::Stats;
