//! Visualizer TUI application state and logic.
//!
//! The app is the driver of the cooperative scheduling model: it converts
//! the engines' pending-tick handles into real deadlines and invokes the
//! due tick from its frame loop. Terminal drawing is handled by the
//! binary from the retained [`FrameStore`] frame.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::config::{VizConfig, SIZE_RANGE, SPEED_RANGE_MS};
use crate::provider::TraceProvider;
use crate::render::{FrameStore, RenderFrame};
use crate::session::VizSession;

/// Which highlight vocabulary the retained frame was drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Sort vocabulary (`sorted`/`swapping`/`comparing`).
    #[default]
    Sort,
    /// Search vocabulary (`searching`/`pivot`/`found`).
    Search,
}

/// Size-slider keyboard step.
const SIZE_STEP: usize = 5;

/// Speed-slider keyboard step in milliseconds.
const SPEED_STEP: u64 = 10;

/// Longest accepted search-target input.
const TARGET_INPUT_MAX: usize = 6;

/// Application state for the visualizer TUI.
pub struct VizApp<P: TraceProvider> {
    /// Session owning array, engines, and provider.
    pub session: VizSession<P>,
    /// Retained latest frame, drawn by the binary.
    pub frame: FrameStore,
    /// Raw search-target input buffer.
    pub target_input: String,
    /// Vocabulary of the retained frame.
    pub mode: ViewMode,
    /// Whether the app should quit.
    pub should_quit: bool,
    sort_deadline: Option<Instant>,
    search_deadline: Option<Instant>,
}

impl<P: TraceProvider> VizApp<P> {
    /// Create the app and render the initial array.
    #[must_use]
    pub fn new(config: VizConfig, provider: P) -> Self {
        let session = VizSession::new(config, provider);
        let mut frame = FrameStore::new();
        session.redraw(&mut frame);

        Self {
            session,
            frame,
            target_input: String::new(),
            mode: ViewMode::Sort,
            should_quit: false,
            sort_deadline: None,
            search_deadline: None,
        }
    }

    /// The retained frame.
    #[must_use]
    pub const fn frame(&self) -> &RenderFrame {
        self.frame.frame()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('g') => {
                if self.session.generate(&mut self.frame) {
                    self.mode = ViewMode::Sort;
                }
            }
            KeyCode::Char('s') => {
                // Failures surface through the status line.
                if self.session.start_sort(&mut self.frame).unwrap_or(false) {
                    self.mode = ViewMode::Sort;
                }
            }
            KeyCode::Char(' ') => {
                self.session.toggle_pause();
            }
            KeyCode::Char('r') => {
                self.session.reset(&mut self.frame);
                self.mode = ViewMode::Sort;
            }
            KeyCode::Char('a') => {
                let next = self.session.config().algorithm.next();
                self.session.set_algorithm(next);
            }
            KeyCode::Char('+' | '=') => {
                let speed = (self.session.config().speed_ms + SPEED_STEP)
                    .min(*SPEED_RANGE_MS.end());
                let _ = self.session.set_speed(speed);
            }
            KeyCode::Char('-') => {
                let speed = self
                    .session
                    .config()
                    .speed_ms
                    .saturating_sub(SPEED_STEP)
                    .max(*SPEED_RANGE_MS.start());
                let _ = self.session.set_speed(speed);
            }
            KeyCode::Char(']') => {
                let size = (self.session.config().size + SIZE_STEP).min(*SIZE_RANGE.end());
                if self.session.set_size(size, &mut self.frame).is_ok() {
                    self.mode = ViewMode::Sort;
                }
            }
            KeyCode::Char('[') => {
                let size = self
                    .session
                    .config()
                    .size
                    .saturating_sub(SIZE_STEP)
                    .max(*SIZE_RANGE.start());
                if self.session.set_size(size, &mut self.frame).is_ok() {
                    self.mode = ViewMode::Sort;
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.target_input.len() < TARGET_INPUT_MAX {
                    self.target_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.target_input.pop();
            }
            KeyCode::Enter => {
                let raw = self.target_input.clone();
                if self
                    .session
                    .start_search(&raw, &mut self.frame)
                    .unwrap_or(false)
                {
                    self.mode = ViewMode::Search;
                }
            }
            _ => {}
        }
    }

    /// Advance the app by one frame: fire any due tick, then re-sync the
    /// deadlines against the engines' pending-tick handles.
    pub fn update(&mut self) {
        let now = Instant::now();

        if self.sort_deadline.is_some_and(|due| now >= due) {
            self.sort_deadline = None;
            self.session.tick_sort(&mut self.frame);
        }

        if self.search_deadline.is_some_and(|due| now >= due) {
            self.search_deadline = None;
            self.session.tick_search(&mut self.frame);
        }

        self.sync_deadlines(now);
    }

    /// Mirror the engines' pending handles into wall-clock deadlines.
    /// A cleared handle clears the deadline (that is how cancellation
    /// propagates); a fresh handle arms one; an already-armed deadline is
    /// left alone.
    fn sync_deadlines(&mut self, now: Instant) {
        self.sort_deadline = match (self.session.sort().pending_delay(), self.sort_deadline) {
            (None, _) => None,
            (Some(delay), None) => Some(now + delay),
            (Some(_), Some(due)) => Some(due),
        };

        self.search_deadline = match (self.session.search().pending_delay(), self.search_deadline)
        {
            (None, _) => None,
            (Some(delay), None) => Some(now + delay),
            (Some(_), Some(due)) => Some(due),
        };
    }

    /// Wall-clock instant of the next due tick, if any run is in flight.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.sort_deadline, self.search_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Poll timeout for the frame loop: time until the next due tick,
    /// capped by the frame budget.
    #[must_use]
    pub fn poll_timeout(&self, frame_budget: Duration) -> Duration {
        self.next_deadline().map_or(frame_budget, |due| {
            due.saturating_duration_since(Instant::now()).min(frame_budget)
        })
    }
}
