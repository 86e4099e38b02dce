//! Event controller tying the sessions and the watchlist together.
//!
//! `update` mutates state synchronously and hands any network continuation
//! back to the host as a boxed future resolving to a completion event. The
//! host loop owns scheduling; everything here assumes events arrive one at
//! a time (single-threaded, event-driven).

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::warn;

use shiori_api::{CatalogClient, CatalogError, MovieDetail, MovieSummary};

use crate::classify::SessionError;
use crate::session::{DetailSession, SearchSession};
use crate::watchlist::WatchlistStore;

/// User intents forwarded by the frontend, plus request completions fed
/// back by the host loop.
#[derive(Debug)]
pub enum Event {
    QueryChanged(String),
    MovieSelected(String),
    RatingSubmitted(u8),
    WatchedAdded,
    WatchedRemoved(String),
    SelectionClosed,
    SearchLoaded {
        generation: u64,
        outcome: Result<Vec<MovieSummary>, CatalogError>,
    },
    DetailLoaded {
        generation: u64,
        outcome: Result<MovieDetail, CatalogError>,
    },
}

/// Application core: search session, detail session, watchlist.
pub struct App<C> {
    client: Arc<C>,
    search: SearchSession,
    detail: DetailSession,
    watchlist: WatchlistStore,
    pending_rating: Option<u8>,
}

impl<C: CatalogClient + 'static> App<C> {
    pub fn new(client: C, watchlist: WatchlistStore) -> Self {
        Self {
            client: Arc::new(client),
            search: SearchSession::new(),
            detail: DetailSession::new(),
            watchlist,
            pending_rating: None,
        }
    }

    /// Handle one event. A returned future must be driven by the host and
    /// its resulting event fed back into `update`.
    pub fn update(&mut self, event: Event) -> Option<BoxFuture<'static, Event>> {
        match event {
            Event::QueryChanged(text) => {
                let request = self.search.set_query(&text)?;
                // A new search invalidates the previous detail context.
                self.detail.close();
                self.pending_rating = None;

                let client = Arc::clone(&self.client);
                Some(
                    async move {
                        let outcome = client.search(&request.query, &request.token).await;
                        Event::SearchLoaded {
                            generation: request.generation,
                            outcome,
                        }
                    }
                    .boxed(),
                )
            }
            Event::MovieSelected(id) => {
                self.pending_rating = None;
                let request = self.detail.select(&id)?;

                let client = Arc::clone(&self.client);
                Some(
                    async move {
                        let outcome = client.fetch_by_id(&request.id, &request.token).await;
                        Event::DetailLoaded {
                            generation: request.generation,
                            outcome,
                        }
                    }
                    .boxed(),
                )
            }
            Event::RatingSubmitted(rating) => {
                self.pending_rating = Some(rating);
                None
            }
            Event::WatchedAdded => {
                let Some(rating) = self.pending_rating else {
                    warn!("no rating submitted, ignoring add");
                    return None;
                };
                match self.detail.build_watched_item(rating) {
                    Ok(item) => {
                        self.watchlist.add(item);
                        self.detail.close();
                        self.pending_rating = None;
                    }
                    Err(e) => warn!(error = %e, "cannot add to watchlist"),
                }
                None
            }
            Event::WatchedRemoved(id) => {
                self.watchlist.remove(&id);
                None
            }
            Event::SelectionClosed => {
                self.detail.close();
                self.pending_rating = None;
                None
            }
            Event::SearchLoaded {
                generation,
                outcome,
            } => {
                self.search.resolve(generation, outcome);
                None
            }
            Event::DetailLoaded {
                generation,
                outcome,
            } => {
                self.detail.resolve(generation, outcome);
                None
            }
        }
    }

    // ── State exposed to the frontend ───────────────────────────────

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search_results(&self) -> &[MovieSummary] {
        self.search.results()
    }

    pub fn search_loading(&self) -> bool {
        self.search.is_loading()
    }

    pub fn search_error(&self) -> &SessionError {
        self.search.error()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.detail.selected_id()
    }

    pub fn selected_detail(&self) -> Option<&MovieDetail> {
        self.detail.record()
    }

    pub fn detail_loading(&self) -> bool {
        self.detail.is_loading()
    }

    pub fn is_watched(&self) -> bool {
        self.detail.is_watched(&self.watchlist)
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }
}
