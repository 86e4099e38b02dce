use chrono::Utc;
use shiori_api::{CancelToken, CatalogError, MovieDetail};
use tracing::debug;

use crate::error::ShioriError;
use crate::watchlist::{WatchedItem, WatchlistStore};

/// A detail fetch the session wants issued, analogous to
/// [`SearchRequest`](crate::session::SearchRequest).
#[derive(Debug, Clone)]
pub struct DetailRequest {
    pub id: String,
    pub generation: u64,
    pub token: CancelToken,
}

/// Owns the selected movie id and the in-flight fetch for it. Lifecycle is
/// independent from the search session; at most one fetch is outstanding.
///
/// Fetch failures are swallowed: the record stays empty and the frontend
/// sees a loading-then-empty transition. This asymmetry with the search
/// session's error surface is part of the contract.
#[derive(Debug, Default)]
pub struct DetailSession {
    selected: Option<String>,
    record: Option<MovieDetail>,
    loading: bool,
    generation: u64,
    token: Option<CancelToken>,
}

impl DetailSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an id. Selecting the currently selected id toggles the view
    /// closed instead of re-fetching; anything else cancels the in-flight
    /// fetch and returns a [`DetailRequest`] for the new id.
    pub fn select(&mut self, id: &str) -> Option<DetailRequest> {
        if self.selected.as_deref() == Some(id) {
            self.close();
            return None;
        }

        self.cancel_in_flight();
        self.selected = Some(id.to_string());
        self.record = None;
        self.loading = true;
        self.generation += 1;

        let token = CancelToken::new();
        self.token = Some(token.clone());
        Some(DetailRequest {
            id: id.to_string(),
            generation: self.generation,
            token,
        })
    }

    /// Clear the selection and cancel any in-flight fetch. Safe to call with
    /// no active selection.
    pub fn close(&mut self) {
        self.cancel_in_flight();
        self.selected = None;
        self.record = None;
        self.loading = false;
    }

    /// Apply a fetch outcome, subject to the same currency check as search.
    pub fn resolve(&mut self, generation: u64, outcome: Result<MovieDetail, CatalogError>) {
        if generation != self.generation || self.token.is_none() {
            debug!(generation, current = self.generation, "dropping stale detail resolution");
            return;
        }
        self.token = None;
        self.loading = false;

        match outcome {
            Ok(detail) => self.record = Some(detail),
            Err(err) => {
                // Deliberately not surfaced; the record stays empty.
                debug!(error = %err, "detail fetch failed");
            }
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn record(&self) -> Option<&MovieDetail> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the selected id is already in the watchlist.
    pub fn is_watched(&self, watchlist: &WatchlistStore) -> bool {
        self.selected
            .as_deref()
            .is_some_and(|id| watchlist.contains(id))
    }

    /// Build a watched item from the loaded record and the user's rating.
    pub fn build_watched_item(&self, user_rating: u8) -> Result<WatchedItem, ShioriError> {
        if self.loading {
            return Err(ShioriError::IncompleteRecord);
        }
        let record = self.record.as_ref().ok_or(ShioriError::IncompleteRecord)?;
        Ok(WatchedItem {
            id: record.id.clone(),
            title: record.title.clone(),
            poster_url: record.poster_url.clone(),
            catalog_rating: record.catalog_rating.unwrap_or_default(),
            runtime_minutes: record.runtime_minutes.unwrap_or_default(),
            user_rating,
            added_at: Utc::now(),
        })
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}
