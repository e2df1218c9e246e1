use crate::listings::filter::{filter_properties, find_property};
use crate::listings::seed::sample_properties;
use crate::listings::types::{FilterChange, FilterState};
use crate::models::Property;
use crate::store::{to_document, CollectionName, Document, DocumentStore, Query, StoreResult};
use tracing::{debug, info};

/// Loaded listings together with the current search term and filters.
///
/// The visible list is derived on every call to [`PropertyCatalog::visible`],
/// so it always reflects the latest list, term and filter state.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    properties: Vec<Property>,
    search_term: String,
    filters: FilterState,
}

impl PropertyCatalog {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Loads `properties`, writing the sample listings first if the collection is empty
    pub async fn load(store: &DocumentStore) -> StoreResult<Self> {
        Self::load_with_seed(store, sample_properties()).await
    }

    pub async fn load_with_seed(store: &DocumentStore, seed: Vec<Property>) -> StoreResult<Self> {
        let collection = store.collection(CollectionName::Properties);
        let stored: Vec<Property> = collection.find_as(&Query::all()).await?;

        if !stored.is_empty() || seed.is_empty() {
            debug!("Loaded {} stored properties", stored.len());
            return Ok(Self::new(stored));
        }

        info!("Seeding empty properties collection with {} listings", seed.len());
        let documents = seed
            .iter()
            .map(to_document::<Property>)
            .collect::<StoreResult<Vec<Document>>>()?;
        let inserted = collection.insert_many(documents).await?;

        // Listings without an id got one from the store; carry it into memory.
        let seeded = seed
            .into_iter()
            .zip(inserted.inserted_ids)
            .map(|(property, id)| Property { id, ..property })
            .collect();
        Ok(Self::new(seeded))
    }

    /// Re-reads the list from the store, keeping the search term and filters
    pub async fn reload(&mut self, store: &DocumentStore) -> StoreResult<()> {
        self.properties = store
            .collection(CollectionName::Properties)
            .find_as(&Query::all())
            .await?;
        Ok(())
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replaces the whole filter state
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Merges individual filter fields into the current state
    pub fn update_filters(&mut self, changes: impl IntoIterator<Item = FilterChange>) {
        self.filters.apply(changes);
    }

    pub fn visible(&self) -> Vec<&Property> {
        filter_properties(&self.properties, &self.search_term, &self.filters)
    }

    pub fn get_property_by_id(&self, id: &str) -> Option<&Property> {
        find_property(&self.properties, id)
    }

    pub fn featured(&self) -> Vec<&Property> {
        self.properties.iter().filter(|p| p.featured).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::types::TypeFilter;
    use crate::store::{MemoryStorage, Update};
    use std::sync::Arc;

    fn store() -> DocumentStore {
        DocumentStore::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn seeds_empty_collection_once() {
        let store = store();
        let catalog = PropertyCatalog::load(&store).await.unwrap();
        assert_eq!(catalog.properties().len(), 6);

        let stored = store
            .collection(CollectionName::Properties)
            .find(&Query::all())
            .await
            .unwrap();
        assert_eq!(stored.len(), 6);

        let again = PropertyCatalog::load(&store).await.unwrap();
        assert_eq!(again.properties(), catalog.properties());
    }

    #[tokio::test]
    async fn seed_without_ids_is_addressable_by_stored_ids() {
        let store = store();
        let seed: Vec<Property> = sample_properties()
            .into_iter()
            .map(|p| Property {
                id: String::new(),
                ..p
            })
            .collect();

        let catalog = PropertyCatalog::load_with_seed(&store, seed).await.unwrap();
        let stored: Vec<Property> = store
            .collection(CollectionName::Properties)
            .find_as(&Query::all())
            .await
            .unwrap();

        assert_eq!(catalog.properties(), stored.as_slice());
        for property in &stored {
            assert!(!property.id.is_empty());
            let found = catalog.get_property_by_id(&property.id).unwrap();
            assert_eq!(found.title, property.title);
        }
    }

    #[tokio::test]
    async fn uses_stored_listings_over_seed() {
        let store = store();
        let mut first = sample_properties();
        first.truncate(2);
        store
            .collection(CollectionName::Properties)
            .insert_many(first.iter().map(|p| to_document(p).unwrap()).collect())
            .await
            .unwrap();

        let catalog = PropertyCatalog::load(&store).await.unwrap();
        assert_eq!(catalog.properties(), first.as_slice());
    }

    #[tokio::test]
    async fn reload_picks_up_updates() {
        let store = store();
        let mut catalog = PropertyCatalog::load(&store).await.unwrap();
        store
            .collection(CollectionName::Properties)
            .update_one(&Query::by_id("2"), &Update::new().set("price", 2_600_000))
            .await
            .unwrap();

        catalog.reload(&store).await.unwrap();
        let villa = catalog.get_property_by_id("2").unwrap();
        assert_eq!(villa.price, 2_600_000);
        assert_eq!(villa.title, "Luxury Waterfront Villa");
    }

    #[test]
    fn visible_follows_search_and_filters() {
        let mut catalog = PropertyCatalog::new(sample_properties());
        assert_eq!(catalog.visible().len(), 6);

        catalog.set_search_term("illinois");
        assert_eq!(catalog.visible().len(), 2);

        catalog.update_filters([FilterChange::Type(TypeFilter::Rent)]);
        let visible: Vec<&str> = catalog.visible().into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(visible, vec!["5"]);

        catalog.set_filters(FilterState::default());
        catalog.set_search_term("");
        assert_eq!(catalog.visible().len(), 6);
    }

    #[test]
    fn featured_listings() {
        let catalog = PropertyCatalog::new(sample_properties());
        let featured: Vec<&str> = catalog.featured().into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["1", "2", "5"]);
    }
}
