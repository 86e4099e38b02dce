//! Trait definition for the remote movie catalog.
//!
//! Sessions and the app controller are written against [`CatalogClient`],
//! so tests can substitute a scripted catalog for the real OMDb client.

use std::future::Future;

use crate::cancel::CancelToken;
use crate::error::CatalogError;

/// Read-only movie catalog interface: search by title, lookup by id.
///
/// Both calls take a [`CancelToken`]; a cancelled call must resolve to
/// [`CatalogError::Cancelled`] rather than a result.
pub trait CatalogClient: Send + Sync {
    /// Search the catalog by title, in the provider's ranking order.
    fn search(
        &self,
        title: &str,
        token: &CancelToken,
    ) -> impl Future<Output = Result<Vec<MovieSummary>, CatalogError>> + Send;

    /// Fetch the full record for one id.
    fn fetch_by_id(
        &self,
        id: &str,
        token: &CancelToken,
    ) -> impl Future<Output = Result<MovieDetail, CatalogError>> + Send;
}

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    /// Release year as reported by the provider; series use ranges
    /// like `"2008–2013"`, so this stays a string.
    pub year: String,
    pub poster_url: Option<String>,
}

/// Full record for a single movie.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub released: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub catalog_rating: Option<f32>,
}
