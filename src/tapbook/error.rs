use thiserror::Error;

#[derive(Error, Debug)]
pub enum TapbookError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Button {index} not found on page '{page}'")]
    ButtonNotFound { page: String, index: usize },

    /// A button's `pos` points outside the page sequence, or the sequence
    /// entry points outside the audio pool. "Nothing to play", not a crash.
    #[error("No playable media for pos {pos} on page '{page}'")]
    InvalidSequenceIndex { page: String, pos: usize },

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Cannot remove the last remaining page")]
    LastPageProtected,

    #[error("Book has no pages")]
    NoPages,

    #[error("Page id already in use: {0}")]
    DuplicatePage(String),

    #[error("Invalid page id: {0}")]
    InvalidPageId(String),

    #[error("Malformed book document: {0}")]
    MalformedDocument(serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TapbookError>;
