use thiserror::Error;

/// Errors from a catalog request.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request's token was invalidated before the response arrived.
    #[error("request cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog responded with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// The provider's "no match" sentinel.
    #[error("no matching entry in the catalog")]
    NotFound,

    #[error("{0}")]
    Other(String),
}
