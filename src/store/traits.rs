use crate::store::error::BackendError;
use async_trait::async_trait;

/// Durable string-keyed medium the document store persists into.
///
/// Each collection is stored as one entry holding the serialized snapshot.
/// Implementations must make `set_item` all-or-nothing: a reader sees either
/// the previous value or the new one, never a partial write.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, BackendError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError>;

    async fn remove_item(&self, key: &str) -> Result<(), BackendError>;

    /// Short label used in log output
    fn backend_name(&self) -> &'static str;
}

/// Strategy for assigning record identifiers on insert
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;

    /// Identifier for one element of a batch insert
    fn next_batch_id(&self) -> String {
        self.next_id()
    }
}
