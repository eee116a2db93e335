//! HTTP client for algorithm engines speaking JSON.
//!
//! Posts to `/api/sort` and `/api/search` under a configured base URL.
//! Blocking by design: the playback model is single-threaded cooperative,
//! and a trace is fetched once per run, before playback begins.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::VizResult;
use crate::provider::{
    SearchRequest, SearchResponse, SortRequest, SortResponse, TraceProvider,
};

/// Blocking JSON-over-HTTP trace provider.
#[derive(Debug)]
pub struct HttpTraceProvider {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTraceProvider {
    /// Create a provider for the engine at `base_url`
    /// (e.g. `http://127.0.0.1:5000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// The configured engine base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> VizResult<Resp> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "requesting trace");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()?
            .error_for_status()?;

        Ok(response.json()?)
    }
}

impl TraceProvider for HttpTraceProvider {
    fn sort(&mut self, request: &SortRequest) -> VizResult<SortResponse> {
        self.post("/api/sort", request)
    }

    fn search(&mut self, request: &SearchRequest) -> VizResult<SearchResponse> {
        self.post("/api/search", request)
    }
}
