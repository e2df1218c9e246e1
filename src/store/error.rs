use thiserror::Error;

/// Failures raised by a storage medium
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures surfaced by the document store.
///
/// A query that matches nothing is not an error: `find_one` returns `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the collection snapshot from the medium failed
    #[error("failed to load collection '{collection}'")]
    Load {
        collection: String,
        #[source]
        source: BackendError,
    },

    /// Writing the collection snapshot failed; nothing was committed
    #[error("failed to persist collection '{collection}'")]
    Persistence {
        collection: String,
        #[source]
        source: BackendError,
    },

    /// The stored snapshot is not a JSON array of objects
    #[error("collection '{collection}' holds malformed data")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// The name is in the reserved key namespace and cannot hold a collection
    #[error("'{0}' is a reserved storage key, not a collection")]
    ReservedName(String),

    /// A value could not be turned into (or read back from) a document
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
