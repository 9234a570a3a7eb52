//! Cache store error types.

use thiserror::Error;

/// Errors from the underlying key/value store.
///
/// Callers treat read errors as cache misses; a broken store never takes
/// down an embed instance.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend storage failed.
    #[error("Store operation failed: {0}")]
    Backend(String),

    /// Failed to serialize a value for storage.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem error from the file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
