//! Render gateway: the single write path to the drawable surface.
//!
//! Every component that wants to show something calls through
//! [`RenderGateway`]. The trait is a pure presentation seam — calls have
//! no return value and must be safe in any engine state. [`FrameStore`]
//! retains the most recent frame for pull-based surfaces such as the TUI.

use serde::Serialize;

use crate::engine::highlight::Highlights;

/// Write path to the drawable surface.
pub trait RenderGateway {
    /// Present one rendering pass: bar values plus the highlight
    /// memberships computed for this pass.
    fn draw(&mut self, values: &[u32], highlights: &Highlights);

    /// Update the user-visible status line.
    fn status(&mut self, message: &str);
}

/// All data needed to render one frame, decoupled from the actual
/// rendering implementation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderFrame {
    /// Bar values.
    pub values: Vec<u32>,
    /// Highlight memberships for this frame.
    pub highlights: Highlights,
    /// Status line.
    pub status: String,
}

/// Gateway that retains the latest frame.
///
/// Draw calls replace the previous values and highlights wholesale —
/// highlights are per-pass state and never accumulate.
#[derive(Debug, Default)]
pub struct FrameStore {
    frame: RenderFrame,
}

impl FrameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered frame.
    #[must_use]
    pub const fn frame(&self) -> &RenderFrame {
        &self.frame
    }
}

impl RenderGateway for FrameStore {
    fn draw(&mut self, values: &[u32], highlights: &Highlights) {
        self.frame.values = values.to_vec();
        self.frame.highlights = highlights.clone();
    }

    fn status(&mut self, message: &str) {
        self.frame.status = message.to_string();
    }
}
