//! Binary-search playback.
//!
//! A variant of the sort playback engine with a different highlight
//! vocabulary and a fixed, non-pausable cadence (the session arms it at
//! twice the base delay to keep the bisection visually legible). Phases:
//! `Idle → Running → Completed → Idle`; the only cancellation path is
//! `reset`.

use std::time::Duration;

use crate::engine::highlight::Highlights;
use crate::engine::playback::{PendingTick, Phase};
use crate::render::RenderGateway;
use crate::trace::SearchStep;

/// Terminal outcome of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target exists; `index` locates it in the sorted array.
    Found {
        /// Index of the target in the sorted array.
        index: usize,
    },
    /// The target is not present.
    NotFound,
}

/// Outcome of one scheduled search tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTick {
    /// One bisection step rendered; the next tick is due after `delay`.
    Rendered {
        /// Cadence until the next tick.
        delay: Duration,
    },
    /// Trace exhausted: terminal overlay/status emitted, engine back to
    /// `Idle`.
    Completed(SearchOutcome),
    /// Engine was not `Running`: nothing rendered, nothing rescheduled.
    Halted,
}

/// State machine replaying a binary-search trace.
pub struct SearchPlayback {
    cadence: Duration,
    phase: Phase,
    array: Vec<u32>,
    trace: Vec<SearchStep>,
    target: u32,
    cursor: usize,
    pending: Option<PendingTick>,
}

impl SearchPlayback {
    /// Create an idle engine with the given (already doubled) cadence.
    #[must_use]
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            phase: Phase::Idle,
            array: Vec::new(),
            trace: Vec::new(),
            target: 0,
            cursor: 0,
            pending: None,
        }
    }

    /// Current phase. Never `Paused` — search playback cannot pause.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current trace cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// A run is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Delay of the pending tick, if one is armed.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(PendingTick::delay)
    }

    /// Change the tick cadence. Applies from the next scheduling decision.
    pub fn set_cadence(&mut self, cadence: Duration) {
        self.cadence = cadence;
    }

    /// Begin replaying a search trace over the engine-sorted array.
    ///
    /// Draws the sorted array (no highlights) before the first bisection
    /// step, then arms a full-cadence tick. Valid only from `Idle`;
    /// concurrent starts are silently rejected (returns `false`).
    pub fn start<G: RenderGateway>(
        &mut self,
        array: Vec<u32>,
        trace: Vec<SearchStep>,
        target: u32,
        gateway: &mut G,
    ) -> bool {
        if self.phase.is_active() {
            return false;
        }

        gateway.draw(&array, &Highlights::none());

        self.array = array;
        self.trace = trace;
        self.target = target;
        self.cursor = 0;
        self.phase = Phase::Running;
        self.pending = Some(PendingTick::after(self.cadence));
        true
    }

    /// Consume one scheduled tick.
    ///
    /// Renders `searching = {low, high}` and `pivot = mid` for the
    /// current step, then advances. On exhausting the trace, inspects the
    /// final step: `found` ⇒ terminal `found = mid` overlay and a success
    /// status with the located index; otherwise (or on an empty trace) a
    /// not-found status with no overlay.
    pub fn tick<G: RenderGateway>(&mut self, gateway: &mut G) -> SearchTick {
        self.pending = None;

        if self.phase != Phase::Running {
            return SearchTick::Halted;
        }

        if self.cursor >= self.trace.len() {
            let outcome = match self.trace.last() {
                Some(last) if last.found => {
                    gateway.draw(&self.array, &Highlights::found_overlay(last.mid));
                    gateway.status(&format!(
                        "Found {} at index {}",
                        self.target, last.mid
                    ));
                    SearchOutcome::Found { index: last.mid }
                }
                _ => {
                    gateway.status(&format!("{} not found in the array", self.target));
                    SearchOutcome::NotFound
                }
            };

            self.trace.clear();
            self.cursor = 0;
            self.phase = Phase::Idle;
            return SearchTick::Completed(outcome);
        }

        let step = self.trace[self.cursor];
        gateway.draw(&self.array, &Highlights::from_search_step(&step));
        self.cursor += 1;
        self.pending = Some(PendingTick::after(self.cadence));

        SearchTick::Rendered {
            delay: self.cadence,
        }
    }

    /// Return to `Idle` from any state: cancels the pending tick and
    /// drops the trace.
    pub fn reset(&mut self) {
        self.pending = None;
        self.trace.clear();
        self.cursor = 0;
        self.phase = Phase::Idle;
    }
}
