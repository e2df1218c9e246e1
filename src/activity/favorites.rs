use crate::listings::PropertyCatalog;
use crate::models::{Favorite, Property};
use crate::store::{
    from_document, to_document, CollectionName, DocumentStore, FindOrInsert, Query, StoreResult,
};
use chrono::Utc;
use tracing::{debug, info};

/// Saved listings per user, kept in the `favorites` collection
#[derive(Clone)]
pub struct FavoritesService {
    store: DocumentStore,
}

impl FavoritesService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    fn pair(user_email: &str, property_id: &str) -> Query {
        Query::new()
            .eq("user_email", user_email)
            .eq("property_id", property_id)
    }

    /// Saves a listing for the user. Saving the same listing twice returns the
    /// existing favorite.
    pub async fn add(&self, user_email: &str, property_id: &str) -> StoreResult<Favorite> {
        let favorite = Favorite {
            id: String::new(),
            user_email: user_email.to_string(),
            property_id: property_id.to_string(),
            date_added: Utc::now().to_rfc3339(),
        };

        let outcome = self
            .store
            .collection(CollectionName::Favorites)
            .find_one_or_insert(
                &Self::pair(user_email, property_id),
                to_document(&favorite)?,
            )
            .await?;

        match outcome {
            FindOrInsert::Found(existing) => {
                debug!("Property {} already saved by {}", property_id, user_email);
                from_document(existing)
            }
            FindOrInsert::Inserted(inserted) => {
                info!("{} saved property {}", user_email, property_id);
                Ok(Favorite {
                    id: inserted.inserted_id,
                    ..favorite
                })
            }
        }
    }

    /// Returns whether a favorite was removed
    pub async fn remove(&self, user_email: &str, property_id: &str) -> StoreResult<bool> {
        let result = self
            .store
            .collection(CollectionName::Favorites)
            .delete_one(&Self::pair(user_email, property_id))
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn list(&self, user_email: &str) -> StoreResult<Vec<Favorite>> {
        self.store
            .collection(CollectionName::Favorites)
            .find_as(&Query::new().eq("user_email", user_email))
            .await
    }

    pub async fn is_favorite(&self, user_email: &str, property_id: &str) -> StoreResult<bool> {
        let found = self
            .store
            .collection(CollectionName::Favorites)
            .find_one(&Self::pair(user_email, property_id))
            .await?;
        Ok(found.is_some())
    }

    /// The user's favorites joined with the catalog. Favorites pointing at a
    /// listing the catalog does not know are skipped.
    pub async fn favorite_properties<'c>(
        &self,
        user_email: &str,
        catalog: &'c PropertyCatalog,
    ) -> StoreResult<Vec<(Favorite, &'c Property)>> {
        let favorites = self.list(user_email).await?;
        Ok(favorites
            .into_iter()
            .filter_map(|favorite| {
                catalog
                    .get_property_by_id(&favorite.property_id)
                    .map(|property| (favorite, property))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::sample_properties;
    use crate::store::{FileStorage, MemoryStorage};
    use std::sync::Arc;

    fn service() -> FavoritesService {
        FavoritesService::new(DocumentStore::new(Arc::new(MemoryStorage::new())))
    }

    #[tokio::test]
    async fn add_is_idempotent_per_user_and_property() {
        let favorites = service();
        let first = favorites.add("a@x.com", "2").await.unwrap();
        let second = favorites.add("a@x.com", "2").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(favorites.list("a@x.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_only_touches_that_pair() {
        let favorites = service();
        favorites.add("a@x.com", "1").await.unwrap();
        favorites.add("a@x.com", "2").await.unwrap();
        favorites.add("b@x.com", "2").await.unwrap();

        assert!(favorites.remove("a@x.com", "2").await.unwrap());
        assert!(!favorites.remove("a@x.com", "2").await.unwrap());

        assert!(favorites.is_favorite("a@x.com", "1").await.unwrap());
        assert!(!favorites.is_favorite("a@x.com", "2").await.unwrap());
        assert!(favorites.is_favorite("b@x.com", "2").await.unwrap());
    }

    #[tokio::test]
    async fn join_skips_unknown_listings() {
        let favorites = service();
        let catalog = PropertyCatalog::new(sample_properties());
        favorites.add("a@x.com", "5").await.unwrap();
        favorites.add("a@x.com", "gone").await.unwrap();
        favorites.add("a@x.com", "1").await.unwrap();

        let joined = favorites
            .favorite_properties("a@x.com", &catalog)
            .await
            .unwrap();
        let ids: Vec<&str> = joined.iter().map(|(_, p)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "1"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_store_one_favorite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let favorites =
            FavoritesService::new(DocumentStore::new(Arc::new(FileStorage::new(temp_dir.path()))));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let favorites = favorites.clone();
            handles.push(tokio::spawn(async move {
                favorites.add("a@x.com", "3").await.unwrap()
            }));
        }
        let mut saved = Vec::new();
        for handle in handles {
            saved.push(handle.await.unwrap());
        }

        assert!(saved.iter().all(|f| f.id == saved[0].id));
        assert_eq!(favorites.list("a@x.com").await.unwrap().len(), 1);

        assert!(favorites.remove("a@x.com", "3").await.unwrap());
        assert!(!favorites.is_favorite("a@x.com", "3").await.unwrap());
    }
}
