use thiserror::Error;

/// lotsize error types
#[derive(Error, Debug)]
pub enum LotsizeError {
    /// Failed to parse a lot file or catalog
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Size catalog is unusable
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LotsizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for lotsize
pub type Result<T> = std::result::Result<T, LotsizeError>;

/// Soft outcomes of drawer edits.
///
/// None of these are failures of the lot itself: the edit is dropped, state
/// stays as it was, and the host decides how to draw attention to it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotNotice {
    /// Another row already holds the requested size
    #[error("size already used in row {}", row + 1)]
    DuplicateSize { row: usize },

    /// Every allowed size already has a row
    #[error("All available sizes have been added.")]
    NoSizesAvailable,

    /// The drawer always keeps at least one row
    #[error("at least one size row is required")]
    LastRow,

    /// Row index does not reference an existing row
    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}
