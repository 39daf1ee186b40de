use thiserror::Error;

/// Failures surfaced by the document and blob backends. Backend messages are
/// passed through unmodified.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document {0} not found")]
    NotFound(String),
    #[error("{0}")]
    Backend(String),
}

/// Errors returned by the content model operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed URL, missing or invalid file, disallowed extension.
    #[error("{0}")]
    InvalidInput(String),
    /// Unknown id on an update.
    #[error("content {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
