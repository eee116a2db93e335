//! Visualizer session: the explicit state root.
//!
//! One `VizSession` owns the input array, the configuration, the array
//! generator, both playback engines, and the trace provider — there is no
//! module-level mutable state. User commands (generate / start sort /
//! pause / reset / start search) arrive here as discrete method calls;
//! the session enforces the shared-resource policy: the array and the
//! drawable surface are single-writer resources, so the generator and the
//! two engines mutually exclude each other.

use crate::config::{Algorithm, VizConfig, SIZE_RANGE, SPEED_RANGE_MS};
use crate::engine::generator::ArrayGenerator;
use crate::engine::highlight::Highlights;
use crate::engine::playback::{Phase, PlaybackEngine, Tick};
use crate::engine::search::{SearchPlayback, SearchTick};
use crate::engine::stats::Stats;
use crate::error::{VizError, VizResult};
use crate::provider::{SearchRequest, SortRequest, TraceProvider};
use crate::render::RenderGateway;
use crate::trace::{validate_search_trace, validate_sort_trace};

/// Owns all visualizer state and routes user commands.
pub struct VizSession<P: TraceProvider> {
    config: VizConfig,
    generator: ArrayGenerator,
    array: Vec<u32>,
    sort: PlaybackEngine,
    search: SearchPlayback,
    provider: P,
}

impl<P: TraceProvider> VizSession<P> {
    /// Create a session and generate the initial array.
    #[must_use]
    pub fn new(config: VizConfig, provider: P) -> Self {
        let mut generator = ArrayGenerator::new(config.seed);
        let array = generator.generate(config.size);
        let sort = PlaybackEngine::new(config.sort_cadence());
        let search = SearchPlayback::new(config.search_cadence());

        Self {
            config,
            generator,
            array,
            sort,
            search,
            provider,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &VizConfig {
        &self.config
    }

    /// The current input array.
    #[must_use]
    pub fn array(&self) -> &[u32] {
        &self.array
    }

    /// Sort playback engine (read-only).
    #[must_use]
    pub const fn sort(&self) -> &PlaybackEngine {
        &self.sort
    }

    /// Search playback engine (read-only).
    #[must_use]
    pub const fn search(&self) -> &SearchPlayback {
        &self.search
    }

    /// Stats of the current (or just-finished) sort run.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        self.sort.stats()
    }

    /// A run is in flight on either engine.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.sort.is_active() || self.search.is_active()
    }

    /// Redraw the current array with no highlights.
    pub fn redraw<G: RenderGateway>(&self, gateway: &mut G) {
        gateway.draw(&self.array, &Highlights::none());
    }

    /// Produce a fresh random array.
    ///
    /// Rejected (no-op, returns `false`) while a run is active, to
    /// prevent races between a live trace and a new array.
    pub fn generate<G: RenderGateway>(&mut self, gateway: &mut G) -> bool {
        if self.busy() {
            tracing::debug!("generate rejected: run in flight");
            return false;
        }

        self.array = self.generator.generate(self.config.size);
        gateway.draw(&self.array, &Highlights::none());
        gateway.status("New array generated");
        true
    }

    /// Change the array length. Forces `Idle` (both engines reset) and
    /// regenerates the array.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, surfaced as a status message with
    /// no state transition, if `size` is outside the slider bounds.
    pub fn set_size<G: RenderGateway>(&mut self, size: usize, gateway: &mut G) -> VizResult<()> {
        if !SIZE_RANGE.contains(&size) {
            let err = VizError::config(format!(
                "array size must be within {}..={}",
                SIZE_RANGE.start(),
                SIZE_RANGE.end()
            ));
            gateway.status(&err.to_string());
            return Err(err);
        }

        self.sort.reset();
        self.search.reset();
        self.config.size = size;
        self.array = self.generator.generate(size);
        gateway.draw(&self.array, &Highlights::none());
        gateway.status("New array generated");
        Ok(())
    }

    /// Change the base tick delay. Takes effect from the next scheduling
    /// decision of either engine.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `speed_ms` is outside the slider
    /// bounds.
    pub fn set_speed(&mut self, speed_ms: u64) -> VizResult<()> {
        if !SPEED_RANGE_MS.contains(&speed_ms) {
            return Err(VizError::config(format!(
                "speed must be within {}..={} ms",
                SPEED_RANGE_MS.start(),
                SPEED_RANGE_MS.end()
            )));
        }

        self.config.speed_ms = speed_ms;
        self.sort.set_cadence(self.config.sort_cadence());
        self.search.set_cadence(self.config.search_cadence());
        Ok(())
    }

    /// Select which trace the algorithm engine should compute.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Fetch a sorting trace for the current array and begin playback.
    ///
    /// Silently rejected (`Ok(false)`) while a run is active.
    ///
    /// # Errors
    ///
    /// On a collaborator failure or a malformed trace the session stays
    /// `Idle`, an error status is emitted, and the error is returned.
    pub fn start_sort<G: RenderGateway>(&mut self, gateway: &mut G) -> VizResult<bool> {
        if self.busy() {
            tracing::debug!("start_sort rejected: run in flight");
            return Ok(false);
        }

        gateway.status("Sorting...");

        let request = SortRequest {
            array: self.array.clone(),
            algorithm: self.config.algorithm,
        };
        let response = match self.provider.sort(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%err, "sort trace request failed");
                gateway.status("Algorithm engine unavailable");
                return Err(err);
            }
        };

        if let Err(err) = validate_sort_trace(&response.steps, self.array.len()) {
            tracing::warn!(%err, "sort trace rejected");
            gateway.status("Algorithm engine returned a malformed trace");
            return Err(err);
        }

        self.sort.start(self.array.clone(), response.steps);
        Ok(true)
    }

    /// Toggle `Paused ⇄ Running` on the sort engine. Returns `false` if
    /// neither transition applied.
    pub fn toggle_pause(&mut self) -> bool {
        match self.sort.phase() {
            Phase::Running => self.sort.pause(),
            Phase::Paused => self.sort.resume(),
            Phase::Idle => false,
        }
    }

    /// Halt sort playback at the current cursor.
    pub fn pause(&mut self) -> bool {
        self.sort.pause()
    }

    /// Continue sort playback from the paused cursor.
    pub fn resume(&mut self) -> bool {
        self.sort.resume()
    }

    /// Cancel any run, clear stats, and render the current array with no
    /// highlights. Valid from any state.
    pub fn reset<G: RenderGateway>(&mut self, gateway: &mut G) {
        self.sort.reset();
        self.search.reset();
        gateway.draw(&self.array, &Highlights::none());
        gateway.status("Visualization reset");
    }

    /// Parse a search target, fetch a binary-search trace, and begin the
    /// slower-cadence playback. The master array is left untouched; the
    /// bisection renders the engine-sorted copy.
    ///
    /// Silently rejected (`Ok(false)`) while a run is active.
    ///
    /// # Errors
    ///
    /// A non-numeric target is rejected with a user-visible status and no
    /// request is made. Collaborator failures and malformed traces behave
    /// as in [`Self::start_sort`].
    pub fn start_search<G: RenderGateway>(
        &mut self,
        raw_target: &str,
        gateway: &mut G,
    ) -> VizResult<bool> {
        if self.busy() {
            tracing::debug!("start_search rejected: run in flight");
            return Ok(false);
        }

        let Ok(target) = raw_target.trim().parse::<u32>() else {
            gateway.status("Please enter a valid target number");
            return Err(VizError::InvalidTarget {
                input: raw_target.to_string(),
            });
        };

        gateway.status(&format!("Searching for {target}..."));

        let request = SearchRequest {
            array: self.array.clone(),
            target,
        };
        let response = match self.provider.search(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%err, "search trace request failed");
                gateway.status("Algorithm engine unavailable");
                return Err(err);
            }
        };

        if let Err(err) = validate_search_trace(&response.steps, response.sorted_array.len()) {
            tracing::warn!(%err, "search trace rejected");
            gateway.status("Algorithm engine returned a malformed trace");
            return Err(err);
        }

        self.search
            .start(response.sorted_array, response.steps, target, gateway);
        Ok(true)
    }

    /// Drive one due sort tick.
    pub fn tick_sort<G: RenderGateway>(&mut self, gateway: &mut G) -> Tick {
        self.sort.tick(gateway)
    }

    /// Drive one due search tick.
    pub fn tick_search<G: RenderGateway>(&mut self, gateway: &mut G) -> SearchTick {
        self.search.tick(gateway)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::provider::{SearchResponse, SortResponse};
    use crate::render::FrameStore;
    use crate::trace::{SearchStep, SortStep};

    /// Canned provider counting requests.
    struct Fixture {
        sort: VizResult<SortResponse>,
        search: VizResult<SearchResponse>,
        sort_calls: usize,
        search_calls: usize,
    }

    impl Fixture {
        fn sorting(steps: Vec<SortStep>) -> Self {
            Self {
                sort: Ok(SortResponse { steps }),
                search: Ok(SearchResponse::default()),
                sort_calls: 0,
                search_calls: 0,
            }
        }

        fn searching(sorted_array: Vec<u32>, steps: Vec<SearchStep>) -> Self {
            Self {
                sort: Ok(SortResponse::default()),
                search: Ok(SearchResponse {
                    sorted_array,
                    steps,
                }),
                sort_calls: 0,
                search_calls: 0,
            }
        }

        fn failing() -> Self {
            Self {
                sort: Err(VizError::provider("connection refused")),
                search: Err(VizError::provider("connection refused")),
                sort_calls: 0,
                search_calls: 0,
            }
        }
    }

    impl TraceProvider for Fixture {
        fn sort(&mut self, _request: &SortRequest) -> VizResult<SortResponse> {
            self.sort_calls += 1;
            match &self.sort {
                Ok(response) => Ok(response.clone()),
                Err(_) => Err(VizError::provider("connection refused")),
            }
        }

        fn search(&mut self, _request: &SearchRequest) -> VizResult<SearchResponse> {
            self.search_calls += 1;
            match &self.search {
                Ok(response) => Ok(response.clone()),
                Err(_) => Err(VizError::provider("connection refused")),
            }
        }
    }

    fn config() -> VizConfig {
        VizConfig::builder().seed(42).size(8).speed_ms(20).build()
    }

    fn trace_for(session_len: usize) -> Vec<SortStep> {
        vec![SortStep {
            array: vec![1; session_len],
            comparing: vec![0, 1],
            ..SortStep::default()
        }]
    }

    #[test]
    fn test_new_session_generates_array() {
        let session = VizSession::new(config(), Fixture::sorting(Vec::new()));
        assert_eq!(session.array().len(), 8);
        assert!(!session.busy());
    }

    #[test]
    fn test_generate_replaces_array() {
        let mut session = VizSession::new(config(), Fixture::sorting(Vec::new()));
        let mut gateway = FrameStore::new();
        let before = session.array().to_vec();

        assert!(session.generate(&mut gateway));
        assert_ne!(session.array(), before.as_slice());
        assert_eq!(gateway.frame().values, session.array());
        assert_eq!(gateway.frame().status, "New array generated");
    }

    #[test]
    fn test_generate_rejected_while_running() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        assert_eq!(session.start_sort(&mut gateway).ok(), Some(true));
        let array = session.array().to_vec();
        assert!(!session.generate(&mut gateway));
        assert_eq!(session.array(), array.as_slice());
    }

    #[test]
    fn test_start_sort_begins_playback() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        assert_eq!(session.start_sort(&mut gateway).ok(), Some(true));
        assert_eq!(session.sort().phase(), Phase::Running);
        assert_eq!(gateway.frame().status, "Sorting...");
    }

    #[test]
    fn test_concurrent_start_sort_is_silent_noop() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        session.start_sort(&mut gateway).ok();
        session.tick_sort(&mut gateway);
        let cursor = session.sort().cursor();
        let stats = *session.stats();

        assert_eq!(session.start_sort(&mut gateway).ok(), Some(false));
        assert_eq!(session.sort().cursor(), cursor);
        assert_eq!(*session.stats(), stats);
    }

    #[test]
    fn test_provider_failure_leaves_idle_with_status() {
        let mut session = VizSession::new(config(), Fixture::failing());
        let mut gateway = FrameStore::new();

        let result = session.start_sort(&mut gateway);
        assert!(result.is_err());
        assert_eq!(session.sort().phase(), Phase::Idle);
        assert_eq!(gateway.frame().status, "Algorithm engine unavailable");
    }

    #[test]
    fn test_malformed_trace_leaves_idle_with_status() {
        // Step array length disagrees with the session array.
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(3)));
        let mut gateway = FrameStore::new();

        let result = session.start_sort(&mut gateway);
        assert!(matches!(result, Err(VizError::MalformedTrace { .. })));
        assert_eq!(session.sort().phase(), Phase::Idle);
        assert_eq!(
            gateway.frame().status,
            "Algorithm engine returned a malformed trace"
        );
    }

    #[test]
    fn test_invalid_target_makes_no_request() {
        let mut session = VizSession::new(config(), Fixture::searching(Vec::new(), Vec::new()));
        let mut gateway = FrameStore::new();

        let result = session.start_search("abc", &mut gateway);
        assert!(matches!(result, Err(VizError::InvalidTarget { .. })));
        assert_eq!(gateway.frame().status, "Please enter a valid target number");
        assert_eq!(session.search().phase(), Phase::Idle);

        // No request was made.
        assert_eq!(session.provider.search_calls, 0);
    }

    #[test]
    fn test_start_search_keeps_master_array_unsorted() {
        let steps = vec![SearchStep {
            low: 0,
            high: 2,
            mid: 1,
            found: true,
        }];
        let mut session = VizSession::new(config(), Fixture::searching(vec![1, 2, 3], steps));
        let mut gateway = FrameStore::new();
        let master = session.array().to_vec();

        assert_eq!(session.start_search(" 2 ", &mut gateway).ok(), Some(true));
        assert_eq!(session.search().phase(), Phase::Running);
        assert_eq!(session.array(), master.as_slice());

        // The sorted copy is what got drawn.
        assert_eq!(gateway.frame().values, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_rejected_while_sorting() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        session.start_sort(&mut gateway).ok();
        assert_eq!(session.start_search("5", &mut gateway).ok(), Some(false));
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        assert!(!session.toggle_pause());

        session.start_sort(&mut gateway).ok();
        assert!(session.toggle_pause());
        assert_eq!(session.sort().phase(), Phase::Paused);
        assert!(session.toggle_pause());
        assert_eq!(session.sort().phase(), Phase::Running);
    }

    #[test]
    fn test_reset_renders_array_without_highlights() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        session.start_sort(&mut gateway).ok();
        session.tick_sort(&mut gateway);
        session.reset(&mut gateway);

        assert_eq!(session.sort().phase(), Phase::Idle);
        assert_eq!(session.sort().cursor(), 0);
        assert_eq!(*session.stats(), Stats::new());
        assert_eq!(gateway.frame().values, session.array());
        assert!(gateway.frame().highlights.is_clear());
        assert_eq!(gateway.frame().status, "Visualization reset");
    }

    #[test]
    fn test_set_size_forces_idle_and_regenerates() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        session.start_sort(&mut gateway).ok();
        assert!(session.set_size(12, &mut gateway).is_ok());

        assert_eq!(session.sort().phase(), Phase::Idle);
        assert_eq!(session.array().len(), 12);
        assert_eq!(session.config().size, 12);
    }

    #[test]
    fn test_set_size_out_of_bounds_changes_nothing() {
        let mut session = VizSession::new(config(), Fixture::sorting(Vec::new()));
        let mut gateway = FrameStore::new();
        let before = session.array().to_vec();

        assert!(session.set_size(3, &mut gateway).is_err());
        assert_eq!(session.array(), before.as_slice());
        assert_eq!(session.config().size, 8);
    }

    #[test]
    fn test_set_speed_updates_cadences() {
        let mut session = VizSession::new(config(), Fixture::sorting(trace_for(8)));
        let mut gateway = FrameStore::new();

        assert!(session.set_speed(100).is_ok());
        assert_eq!(session.config().speed_ms, 100);

        session.start_sort(&mut gateway).ok();
        assert!(matches!(
            session.tick_sort(&mut gateway),
            Tick::Rendered { delay } if delay == std::time::Duration::from_millis(100)
        ));

        assert!(session.set_speed(2).is_err());
    }

    #[test]
    fn test_set_algorithm() {
        let mut session = VizSession::new(config(), Fixture::sorting(Vec::new()));
        session.set_algorithm(Algorithm::Heap);
        assert_eq!(session.config().algorithm, Algorithm::Heap);
    }
}
