//! Maps low-level catalog failures onto the fixed session error taxonomy.

use shiori_api::CatalogError;

/// Error state exposed by a session.
///
/// `Cancelled` exists in the taxonomy but is never surfaced: a cancellation
/// always means the request was superseded, so sessions store `None` for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionError {
    #[default]
    None,
    Cancelled,
    /// Transport-level failure: connection refused, DNS, non-2xx status,
    /// malformed response body.
    Network,
    NotFound,
    Other(String),
}

impl SessionError {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The text a frontend should show, if any. `None` and `Cancelled`
    /// render nothing, `Network` a generic connectivity message,
    /// `NotFound` an empty-state message, `Other` its message verbatim.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::None | Self::Cancelled => None,
            Self::Network => Some("Something went wrong with fetching movies.".into()),
            Self::NotFound => Some("Movie not found".into()),
            Self::Other(message) => Some(message.clone()),
        }
    }
}

/// Pure mapping from a catalog failure to a [`SessionError`].
pub fn classify(err: &CatalogError) -> SessionError {
    match err {
        CatalogError::Cancelled => SessionError::Cancelled,
        CatalogError::Http(_) | CatalogError::Api { .. } | CatalogError::Parse(_) => {
            SessionError::Network
        }
        CatalogError::NotFound => SessionError::NotFound,
        CatalogError::Other(message) => SessionError::Other(message.clone()),
    }
}
