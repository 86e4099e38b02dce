//! Per-concern session state: one for search, one for detail.
//!
//! A session owns its query/selection, the generation-tagged token of its
//! in-flight request, and the derived result state. Starting a new request
//! cancels the previous token, and a resolution only applies while its
//! generation is still current. Stale responses are dropped even when they
//! complete successfully.

mod detail;
mod search;

pub use detail::{DetailRequest, DetailSession};
pub use search::{SearchRequest, SearchSession, MIN_QUERY_LEN};
