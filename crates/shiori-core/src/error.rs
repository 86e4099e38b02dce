use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShioriError {
    /// `build_watched_item` was called with no loaded detail record.
    #[error("detail record is not loaded yet")]
    IncompleteRecord,

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
