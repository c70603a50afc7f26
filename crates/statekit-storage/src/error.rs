use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`KeyValueStorage`](crate::KeyValueStorage) backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for `{key}`: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing would exceed the backend's byte quota
    #[error("storage quota of {quota} bytes exceeded while writing `{key}`")]
    QuotaExceeded { key: String, quota: usize },
}
