use crate::store::error::{StoreError, StoreResult};
use crate::store::ids::UuidIdGenerator;
use crate::store::traits::{IdGenerator, StorageBackend};
use crate::store::types::{
    from_document, DeleteResult, Document, FindOrInsert, InsertManyResult, InsertOneResult, Query,
    Update, UpdateResult, ID_FIELD, RESERVED_KEY_PREFIX,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

/// Document-database style client over named collections.
///
/// Each collection is one snapshot in the storage backend. Every operation
/// loads the snapshot, works on it in memory and, for mutations, writes the
/// whole snapshot back before returning. Operations on the same collection are
/// serialized by a per-collection lock held across that whole cycle.
///
/// Callers only ever receive copies of stored records; editing a returned
/// document has no effect until it is written back with an update or insert.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    ids: Arc<dyn IdGenerator>,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_id_generator(backend, Arc::new(UuidIdGenerator))
    }

    pub fn with_id_generator(backend: Arc<dyn StorageBackend>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            backend,
            ids,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Handle on a collection. The collection is created empty on first access.
    pub fn collection(&self, name: impl AsRef<str>) -> Collection<'_> {
        Collection {
            store: self,
            name: name.as_ref().to_string(),
        }
    }

    async fn lock_collection(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(name.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    async fn load(&self, name: &str) -> StoreResult<Vec<Document>> {
        if name.starts_with(RESERVED_KEY_PREFIX) {
            return Err(StoreError::ReservedName(name.to_string()));
        }

        let raw = self
            .backend
            .get_item(name)
            .await
            .map_err(|source| StoreError::Load {
                collection: name.to_string(),
                source,
            })?;

        match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                collection: name.to_string(),
                source,
            }),
            None => {
                debug!("Initializing empty collection '{}'", name);
                self.save(name, &[]).await?;
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, name: &str, records: &[Document]) -> StoreResult<()> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Corrupt {
            collection: name.to_string(),
            source,
        })?;

        self.backend.set_item(name, &raw).await.map_err(|source| {
            warn!(
                "Failed to persist collection '{}' to {} storage: {}",
                name,
                self.backend.backend_name(),
                source
            );
            StoreError::Persistence {
                collection: name.to_string(),
                source,
            }
        })
    }

    fn stamp(&self, mut document: Document, batch: bool) -> (String, Document) {
        // A caller-supplied string id is kept; a missing or non-string id is replaced.
        let id = match document.get(ID_FIELD) {
            Some(Value::String(existing)) => existing.clone(),
            _ if batch => self.ids.next_batch_id(),
            _ => self.ids.next_id(),
        };
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        (id, document)
    }
}

/// Operations on one named collection
pub struct Collection<'a> {
    store: &'a DocumentStore,
    name: String,
}

impl Collection<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All records matching `query`, in storage order
    pub async fn find(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let _guard = self.store.lock_collection(&self.name).await;
        let records = self.store.load(&self.name).await?;
        if query.is_empty() {
            return Ok(records);
        }
        Ok(records.into_iter().filter(|r| query.matches(r)).collect())
    }

    /// First record matching `query`, or `None`
    pub async fn find_one(&self, query: &Query) -> StoreResult<Option<Document>> {
        let _guard = self.store.lock_collection(&self.name).await;
        let records = self.store.load(&self.name).await?;
        Ok(records.into_iter().find(|r| query.matches(r)))
    }

    pub async fn find_as<T: DeserializeOwned>(&self, query: &Query) -> StoreResult<Vec<T>> {
        self.find(query)
            .await?
            .into_iter()
            .map(from_document::<T>)
            .collect()
    }

    pub async fn find_one_as<T: DeserializeOwned>(&self, query: &Query) -> StoreResult<Option<T>> {
        self.find_one(query).await?.map(from_document::<T>).transpose()
    }

    /// Appends a copy of `document` with an identifier and persists the collection.
    ///
    /// No uniqueness is enforced beyond the identifier itself.
    pub async fn insert_one(&self, document: Document) -> StoreResult<InsertOneResult> {
        let _guard = self.store.lock_collection(&self.name).await;
        let mut records = self.store.load(&self.name).await?;

        let (inserted_id, inserted_doc) = self.store.stamp(document, false);
        records.push(inserted_doc.clone());
        self.store.save(&self.name, &records).await?;

        debug!("Inserted '{}' into '{}'", inserted_id, self.name);
        Ok(InsertOneResult {
            inserted_id,
            inserted_doc,
        })
    }

    /// Returns the first record matching `query`, or inserts `document` when
    /// nothing matches. The check and the insert run under one lock, so
    /// concurrent callers with the same query insert at most once.
    pub async fn find_one_or_insert(
        &self,
        query: &Query,
        document: Document,
    ) -> StoreResult<FindOrInsert> {
        let _guard = self.store.lock_collection(&self.name).await;
        let mut records = self.store.load(&self.name).await?;

        if let Some(existing) = records.iter().find(|r| query.matches(r)) {
            return Ok(FindOrInsert::Found(existing.clone()));
        }

        let (inserted_id, inserted_doc) = self.store.stamp(document, false);
        records.push(inserted_doc.clone());
        self.store.save(&self.name, &records).await?;

        debug!("Inserted '{}' into '{}' (no prior match)", inserted_id, self.name);
        Ok(FindOrInsert::Inserted(InsertOneResult {
            inserted_id,
            inserted_doc,
        }))
    }

    /// Appends every document, each with its own identifier, in a single write
    pub async fn insert_many(&self, documents: Vec<Document>) -> StoreResult<InsertManyResult> {
        let _guard = self.store.lock_collection(&self.name).await;
        let mut records = self.store.load(&self.name).await?;

        let mut inserted_ids = Vec::with_capacity(documents.len());
        for document in documents {
            let (id, stamped) = self.store.stamp(document, true);
            records.push(stamped);
            inserted_ids.push(id);
        }
        self.store.save(&self.name, &records).await?;

        debug!("Inserted {} records into '{}'", inserted_ids.len(), self.name);
        Ok(InsertManyResult { inserted_ids })
    }

    /// Shallow-merges `update` into the first record matching `query`
    pub async fn update_one(&self, query: &Query, update: &Update) -> StoreResult<UpdateResult> {
        let _guard = self.store.lock_collection(&self.name).await;
        let mut records = self.store.load(&self.name).await?;

        let modified_count = match records.iter_mut().find(|r| query.matches(r)) {
            Some(record) => {
                update.apply_to(record);
                1
            }
            None => 0,
        };
        self.store.save(&self.name, &records).await?;

        debug!("Updated {} record(s) in '{}'", modified_count, self.name);
        Ok(UpdateResult { modified_count })
    }

    /// Removes the first record matching `query`
    pub async fn delete_one(&self, query: &Query) -> StoreResult<DeleteResult> {
        let _guard = self.store.lock_collection(&self.name).await;
        let mut records = self.store.load(&self.name).await?;

        let deleted_count = match records.iter().position(|r| query.matches(r)) {
            Some(index) => {
                records.remove(index);
                1
            }
            None => 0,
        };
        self.store.save(&self.name, &records).await?;

        debug!("Deleted {} record(s) from '{}'", deleted_count, self.name);
        Ok(DeleteResult { deleted_count })
    }
}
