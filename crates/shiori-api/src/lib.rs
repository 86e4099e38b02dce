//! Remote movie catalog protocol: cancellable search and lookup-by-id.

pub mod cancel;
pub mod error;
pub mod omdb;
pub mod traits;

pub use cancel::CancelToken;
pub use error::CatalogError;
pub use traits::{CatalogClient, MovieDetail, MovieSummary};
