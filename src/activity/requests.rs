use crate::models::{ContactRequest, ViewingRequest};
use crate::store::{from_document, to_document, CollectionName, DocumentStore, Query, StoreResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields entered when booking a viewing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewingForm {
    pub property_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: Option<String>,
}

/// Fields entered when messaging the agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactForm {
    pub property_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
}

/// Viewing and contact requests. Both are append-only.
#[derive(Clone)]
pub struct RequestService {
    store: DocumentStore,
}

impl RequestService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub async fn schedule_viewing(&self, form: ViewingForm) -> StoreResult<ViewingRequest> {
        let request = ViewingRequest {
            id: String::new(),
            property_id: form.property_id,
            full_name: form.full_name,
            email: form.email,
            phone_number: form.phone_number,
            preferred_date: form.preferred_date,
            preferred_time: form.preferred_time,
            additional_notes: form.additional_notes.filter(|notes| !notes.trim().is_empty()),
            created_at: Utc::now().to_rfc3339(),
        };

        let inserted = self
            .store
            .collection(CollectionName::ViewingRequests)
            .insert_one(to_document(&request)?)
            .await?;
        info!(
            "Viewing of {} requested for {} {}",
            request.property_id, request.preferred_date, request.preferred_time
        );
        from_document(inserted.inserted_doc)
    }

    pub async fn viewings_for(&self, email: &str) -> StoreResult<Vec<ViewingRequest>> {
        self.store
            .collection(CollectionName::ViewingRequests)
            .find_as(&Query::new().eq("email", email))
            .await
    }

    pub async fn contact_agent(&self, form: ContactForm) -> StoreResult<ContactRequest> {
        let request = ContactRequest {
            id: String::new(),
            property_id: form.property_id,
            full_name: form.full_name,
            email: form.email,
            phone_number: form.phone_number,
            message: form.message,
            created_at: Utc::now().to_rfc3339(),
        };

        let inserted = self
            .store
            .collection(CollectionName::ContactRequests)
            .insert_one(to_document(&request)?)
            .await?;
        info!("Contact request for {} from {}", request.property_id, request.email);
        from_document(inserted.inserted_doc)
    }

    pub async fn contact_requests_for(&self, email: &str) -> StoreResult<Vec<ContactRequest>> {
        self.store
            .collection(CollectionName::ContactRequests)
            .find_as(&Query::new().eq("email", email))
            .await
    }
}
