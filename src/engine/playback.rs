//! Sort-trace playback state machine.
//!
//! The engine owns the trace cursor, the phase, the stats, and a
//! pending-tick handle. Scheduling is cooperative: the engine never
//! sleeps or spawns — it records that a tick is due after a delay, and
//! the driver (a frame loop or a test harness) invokes [`PlaybackEngine::tick`]
//! when that delay elapses. Cancellation is clearing the handle; a tick
//! already dispatched completes its render.
//!
//! Phases: `Idle → Running → {Paused ⇄ Running} → Completed → Idle`.
//! `Completed` is transient — it is observable only as [`Tick::Completed`],
//! after which the engine is already `Idle` and reusable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::highlight::Highlights;
use crate::engine::stats::Stats;
use crate::render::RenderGateway;
use crate::trace::SortStep;

/// Engine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No run in flight; `start` is accepted.
    #[default]
    Idle,
    /// Consuming the trace, one step per scheduled tick.
    Running,
    /// Halted mid-trace; the pending tick is cancelled until resume.
    Paused,
}

impl Phase {
    /// A run is in flight (Running or Paused); `start` is rejected.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// Handle to the next scheduled tick.
///
/// Owning engines clear this to cancel; drivers read the delay to arm a
/// real deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    delay: Duration,
}

impl PendingTick {
    /// A tick due as soon as the driver gets around to it.
    #[must_use]
    pub(crate) const fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// A tick due after the given delay.
    #[must_use]
    pub(crate) const fn after(delay: Duration) -> Self {
        Self { delay }
    }

    /// How long after the arming moment this tick is due.
    #[must_use]
    pub const fn delay(self) -> Duration {
        self.delay
    }
}

/// Outcome of one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One step rendered; the next tick is due after `delay`.
    Rendered {
        /// Cadence until the next tick.
        delay: Duration,
    },
    /// Trace exhausted: final frame rendered with every index sorted,
    /// terminal status emitted, engine back to `Idle`.
    Completed,
    /// Engine was not `Running`: nothing rendered, nothing rescheduled.
    Halted,
}

/// State machine replaying a sort trace.
pub struct PlaybackEngine {
    cadence: Duration,
    phase: Phase,
    array: Vec<u32>,
    trace: Vec<SortStep>,
    cursor: usize,
    stats: Stats,
    pending: Option<PendingTick>,
}

impl PlaybackEngine {
    /// Create an idle engine with the given tick cadence.
    #[must_use]
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            phase: Phase::Idle,
            array: Vec::new(),
            trace: Vec::new(),
            cursor: 0,
            stats: Stats::new(),
            pending: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current trace cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Running statistics for the current (or just-finished) run.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
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

    /// Change the tick cadence. Applies from the next scheduling
    /// decision; an already-armed tick keeps its original delay.
    pub fn set_cadence(&mut self, cadence: Duration) {
        self.cadence = cadence;
    }

    /// Begin replaying a trace over the given input array.
    ///
    /// Valid only from `Idle`: at most one playback is active at a time,
    /// and a concurrent start is silently rejected (returns `false`,
    /// cursor and stats untouched). On acceptance the stats are zeroed,
    /// the cursor returns to 0, and an immediate tick is armed.
    pub fn start(&mut self, array: Vec<u32>, trace: Vec<SortStep>) -> bool {
        if self.phase.is_active() {
            return false;
        }

        self.array = array;
        self.trace = trace;
        self.cursor = 0;
        self.stats.clear();
        self.phase = Phase::Running;
        self.pending = Some(PendingTick::immediate());
        true
    }

    /// Consume one scheduled tick.
    ///
    /// Not `Running` ⇒ no render, no reschedule — pausing halts future
    /// scheduling entirely rather than skipping renders. Cursor past the
    /// end ⇒ terminal frame + status, engine back to `Idle`. Otherwise the
    /// current step is rendered through the highlight compositor, stats
    /// accumulate, the cursor advances, and the next tick is armed after
    /// the cadence.
    pub fn tick<G: RenderGateway>(&mut self, gateway: &mut G) -> Tick {
        self.pending = None;

        if self.phase != Phase::Running {
            return Tick::Halted;
        }

        if self.cursor >= self.trace.len() {
            let values = self.trace.last().map_or(&self.array, |step| &step.array);
            gateway.draw(values, &Highlights::all_sorted(values.len()));
            gateway.status("Sorting complete");

            // Completed, then immediately Idle: a fresh trace is required
            // to replay.
            self.trace.clear();
            self.cursor = 0;
            self.phase = Phase::Idle;
            return Tick::Completed;
        }

        let step = &self.trace[self.cursor];
        gateway.draw(&step.array, &Highlights::from_sort_step(step));
        self.stats.record(step);
        self.cursor += 1;
        self.pending = Some(PendingTick::after(self.cadence));

        Tick::Rendered {
            delay: self.cadence,
        }
    }

    /// Halt at the current cursor. Cancels the pending tick; returns
    /// `false` unless the engine was `Running`.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.phase = Phase::Paused;
        self.pending = None;
        true
    }

    /// Continue from the paused cursor. Arms an immediate tick, since
    /// pausing cancelled the scheduled one; returns `false` unless the
    /// engine was `Paused`.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }

        self.phase = Phase::Running;
        self.pending = Some(PendingTick::immediate());
        true
    }

    /// Return to `Idle` from any state: cancels the pending tick, drops
    /// the trace, zeroes the cursor and stats.
    pub fn reset(&mut self) {
        self.pending = None;
        self.trace.clear();
        self.cursor = 0;
        self.stats.clear();
        self.phase = Phase::Idle;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::render::FrameStore;
    use proptest::prelude::*;

    fn arb_trace(len: usize) -> impl Strategy<Value = Vec<SortStep>> {
        prop::collection::vec(
            (
                prop::collection::vec(0u32..500, len..=len),
                prop::collection::vec(0..len, 0..3),
                prop::collection::vec(0..len, 0..3),
            )
                .prop_map(|(array, comparing, swapping)| SortStep {
                    array,
                    comparing,
                    swapping,
                    ..SortStep::default()
                }),
            0..24,
        )
    }

    /// Gateway recording every draw, for order verification.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<u32>>,
    }

    impl RenderGateway for Recorder {
        fn draw(&mut self, values: &[u32], _highlights: &Highlights) {
            self.frames.push(values.to_vec());
        }

        fn status(&mut self, _message: &str) {}
    }

    proptest! {
        /// Replaying any trace from Idle visits every step exactly once,
        /// in order, then terminates Completed → Idle.
        #[test]
        fn prop_every_step_once_in_order(trace in arb_trace(6)) {
            let mut engine = PlaybackEngine::new(Duration::from_millis(10));
            let mut gateway = Recorder::default();

            prop_assert!(engine.start(vec![0; 6], trace.clone()));

            let mut ticks = 0;
            loop {
                match engine.tick(&mut gateway) {
                    Tick::Rendered { .. } => ticks += 1,
                    Tick::Completed => break,
                    Tick::Halted => prop_assert!(false, "halted mid-run"),
                }
                prop_assert!(ticks <= trace.len(), "more ticks than steps");
            }

            prop_assert_eq!(ticks, trace.len());
            prop_assert_eq!(engine.phase(), Phase::Idle);

            // Step frames (excluding the terminal frame) match the trace
            // arrays in order.
            let step_frames = &gateway.frames[..trace.len()];
            for (frame, step) in step_frames.iter().zip(&trace) {
                prop_assert_eq!(frame, &step.array);
            }
        }

        /// Pausing at an arbitrary cursor and resuming replays nothing
        /// and skips nothing.
        #[test]
        fn prop_pause_resume_exact(trace in arb_trace(4), pause_at in 0usize..24) {
            let mut engine = PlaybackEngine::new(Duration::from_millis(10));
            let mut gateway = Recorder::default();
            engine.start(vec![0; 4], trace.clone());

            let pause_at = pause_at.min(trace.len());
            for _ in 0..pause_at {
                engine.tick(&mut gateway);
            }
            engine.pause();
            prop_assert_eq!(engine.tick(&mut gateway), Tick::Halted);
            engine.resume();

            while !matches!(engine.tick(&mut gateway), Tick::Completed) {}

            prop_assert_eq!(gateway.frames.len(), trace.len() + 1);
            for (frame, step) in gateway.frames.iter().zip(&trace) {
                prop_assert_eq!(frame, &step.array);
            }
        }
    }
}
