use shiori_api::{CancelToken, CatalogError, MovieSummary};
use tracing::debug;

use crate::classify::{classify, SessionError};

/// Queries shorter than this never hit the network.
pub const MIN_QUERY_LEN: usize = 3;

/// A search the session wants issued. The driver hands `token` to the
/// catalog client and feeds the outcome back via [`SearchSession::resolve`]
/// with the same `generation`.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub generation: u64,
    pub token: CancelToken,
}

/// Owns the current query, the in-flight search, and the derived
/// result/error/loading state. At most one search is outstanding.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    results: Vec<MovieSummary>,
    loading: bool,
    error: SessionError,
    generation: u64,
    token: Option<CancelToken>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new query. Below [`MIN_QUERY_LEN`] this synchronously clears
    /// results and error and returns `None`; otherwise the previous search is
    /// cancelled and a new [`SearchRequest`] is returned for the driver to
    /// issue.
    pub fn set_query(&mut self, text: &str) -> Option<SearchRequest> {
        self.query = text.to_string();
        self.cancel_in_flight();

        if text.chars().count() < MIN_QUERY_LEN {
            self.results.clear();
            self.error = SessionError::None;
            self.loading = false;
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.error = SessionError::None;

        let token = CancelToken::new();
        self.token = Some(token.clone());
        Some(SearchRequest {
            query: text.to_string(),
            generation: self.generation,
            token,
        })
    }

    /// Apply a search outcome. Only the most recently issued request's
    /// resolution may update state; anything else is discarded.
    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<Vec<MovieSummary>, CatalogError>,
    ) {
        if generation != self.generation || self.token.is_none() {
            debug!(generation, current = self.generation, "dropping stale search resolution");
            return;
        }
        self.token = None;
        self.loading = false;

        match outcome {
            Ok(items) => {
                self.results = items;
                self.error = SessionError::None;
            }
            Err(err) => {
                self.results.clear();
                self.error = match classify(&err) {
                    // A cancellation here means this session superseded its
                    // own request; never surface it as an error.
                    SessionError::Cancelled => SessionError::None,
                    other => other,
                };
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> &SessionError {
        &self.error
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}
