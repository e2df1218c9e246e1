pub mod client;
pub mod error;
pub mod file;
pub mod ids;
pub mod memory;
pub mod traits;
pub mod types;

pub use client::{Collection, DocumentStore};
pub use error::{BackendError, StoreError, StoreResult};
pub use file::FileStorage;
pub use ids::{IdStrategy, SequentialIdGenerator, TimestampIdGenerator, UuidIdGenerator};
pub use memory::MemoryStorage;
pub use traits::{IdGenerator, StorageBackend};
pub use types::{
    from_document, to_document, CollectionName, DeleteResult, Document, FindOrInsert,
    InsertManyResult, InsertOneResult, Query, Update, UpdateResult, ID_FIELD, RESERVED_KEY_PREFIX,
};
