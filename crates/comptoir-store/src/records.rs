//! # Generic Record API
//!
//! CRUD façade over one named collection. Every operation is `async fn`
//! even though the local store is synchronous: the contract must tolerate
//! being backed by a real network service later without changing callers.
//!
//! ## Logical Endpoints
//! ```text
//! get_all    GET    /{collection}
//! get_by_id  GET    /{collection}/{id}
//! create     POST   /{collection}        (id generated when absent)
//! update     PUT    /{collection}/{id}   (top-level field merge)
//! delete     DELETE /{collection}/{id}
//! ```
//!
//! Operations return typed `StoreResult`s; [`ApiResponse`] is the
//! serializable `{success, data?, error?}` envelope for the boundary that
//! still speaks the legacy shape.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use comptoir_core::{CatalogItem, Counterparty, FinancialDocument};

use crate::error::{StoreError, StoreResult};
use crate::kv::CollectionStore;

// =============================================================================
// Record Trait
// =============================================================================

/// A persistable record: serde-round-trippable with an addressable id.
///
/// An empty id marks a record that has never been persisted; `create`
/// fills it with a fresh UUID.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

impl Record for FinancialDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Counterparty {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// =============================================================================
// Records<T>
// =============================================================================

/// CRUD over one collection of `T`.
///
/// Cheap to clone; clones address the same collection of the same store.
#[derive(Clone)]
pub struct Records<T: Record> {
    store: CollectionStore,
    collection: &'static str,
    /// Entity label for not-found messages ("Client", "Proforma", ...).
    entity: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Record> Records<T> {
    pub fn new(store: CollectionStore, collection: &'static str, entity: &'static str) -> Self {
        Records {
            store,
            collection,
            entity,
            _marker: PhantomData,
        }
    }

    /// Collection key this façade addresses.
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Returns the whole collection.
    pub async fn get_all(&self) -> StoreResult<Vec<T>> {
        self.store.get(self.collection)
    }

    /// Returns one record by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<T> {
        let records: Vec<T> = self.store.get(self.collection)?;
        records
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(self.entity, id))
    }

    /// Appends a record, generating a UUID id when the record carries
    /// none, and returns it as stored.
    pub async fn create(&self, mut record: T) -> StoreResult<T> {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }

        let mut records: Vec<T> = self.store.get(self.collection)?;
        records.push(record.clone());
        self.store.commit(self.collection, &records)?;

        debug!(collection = self.collection, id = record.id(), "Record created");
        Ok(record)
    }

    /// Merges a partial record into the stored one and returns the result.
    ///
    /// The patch is a JSON object; its top-level fields overwrite the
    /// stored record's, untouched fields survive, and the id cannot be
    /// changed through a patch.
    pub async fn update(&self, id: &str, patch: serde_json::Value) -> StoreResult<T> {
        let Some(patch_fields) = patch.as_object() else {
            return Err(StoreError::InvalidPatch);
        };

        let mut records: Vec<T> = self.store.get(self.collection)?;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(self.entity, id))?;

        let mut merged = serde_json::to_value(&records[position])?;
        if let Some(fields) = merged.as_object_mut() {
            for (key, value) in patch_fields {
                if key == "id" {
                    continue;
                }
                fields.insert(key.clone(), value.clone());
            }
        }

        let updated: T = serde_json::from_value(merged)?;
        records[position] = updated.clone();
        self.store.commit(self.collection, &records)?;

        debug!(collection = self.collection, id, "Record updated");
        Ok(updated)
    }

    /// Creates or updates depending on whether the record carries an id.
    ///
    /// Existing records are replaced wholesale (the caller holds the full
    /// shape, not a patch).
    pub async fn save(&self, record: T) -> StoreResult<T> {
        if record.id().is_empty() {
            return self.create(record).await;
        }

        let mut records: Vec<T> = self.store.get(self.collection)?;
        let position = records
            .iter()
            .position(|r| r.id() == record.id())
            .ok_or_else(|| StoreError::not_found(self.entity, record.id()))?;
        records[position] = record.clone();
        self.store.commit(self.collection, &records)?;

        debug!(collection = self.collection, id = record.id(), "Record saved");
        Ok(record)
    }

    /// Deletes a record by id. Destructive and final.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records: Vec<T> = self.store.get(self.collection)?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Err(StoreError::not_found(self.entity, id));
        }

        self.store.commit(self.collection, &records)?;
        debug!(collection = self.collection, id, "Record deleted");
        Ok(())
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// The legacy `{success, data?, error?}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<StoreResult<T>> for ApiResponse<T> {
    fn from(result: StoreResult<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => ApiResponse::err(err.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::keys;
    use chrono::Utc;
    use comptoir_core::{CounterpartyKind, Money};

    fn client_records() -> Records<Counterparty> {
        let store = CollectionStore::open_in_memory().unwrap();
        Records::new(store, keys::CLIENTS, "Client")
    }

    fn client(name: &str) -> Counterparty {
        Counterparty {
            id: String::new(),
            kind: CounterpartyKind::Client,
            name: name.to_string(),
            phone: "70000000".to_string(),
            email: None,
            address: None,
            balance: Money::zero(),
            category: "detail".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_generates_id() {
        let records = client_records();
        let created = records.create(client("Boutique Sanou")).await.unwrap();
        assert!(!created.id().is_empty());

        let all = records.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Boutique Sanou");
    }

    #[tokio::test]
    async fn test_create_keeps_business_id() {
        let records = client_records();
        let mut c = client("Boutique Sanou");
        c.id = "CLI0001".to_string();
        let created = records.create(c).await.unwrap();
        assert_eq!(created.id(), "CLI0001");
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_untouched_fields() {
        let records = client_records();
        let mut c = client("Boutique Sanou");
        c.address = Some("Ouagadougou".to_string());
        let created = records.create(c).await.unwrap();

        let patch = serde_json::json!({ "phone": "71111111" });
        let updated = records.update(created.id(), patch).await.unwrap();

        // touched field takes the patch value, untouched fields survive
        assert_eq!(updated.phone, "71111111");
        assert_eq!(updated.name, "Boutique Sanou");
        assert_eq!(updated.address.as_deref(), Some("Ouagadougou"));
        assert_eq!(updated.id(), created.id());
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() {
        let records = client_records();
        let created = records.create(client("A")).await.unwrap();

        let patch = serde_json::json!({ "id": "CLI9999", "name": "B" });
        let updated = records.update(created.id(), patch).await.unwrap();
        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.name, "B");
    }

    #[tokio::test]
    async fn test_update_rejects_non_object_patch() {
        let records = client_records();
        let created = records.create(client("A")).await.unwrap();

        let result = records.update(created.id(), serde_json::json!([1, 2])).await;
        assert!(matches!(result, Err(StoreError::InvalidPatch)));
    }

    #[tokio::test]
    async fn test_delete_then_get_by_id_is_not_found() {
        let records = client_records();
        let created = records.create(client("A")).await.unwrap();

        records.delete(created.id()).await.unwrap();
        let result = records.get_by_id(created.id()).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        // deleting again also reports not found
        let result = records.delete(created.id()).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let records = client_records();
        let mut created = records.create(client("A")).await.unwrap();
        created.name = "A prime".to_string();

        records.save(created.clone()).await.unwrap();
        let back = records.get_by_id(created.id()).await.unwrap();
        assert_eq!(back.name, "A prime");
        assert_eq!(records.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_envelope_shape() {
        let records = client_records();
        let response: ApiResponse<Counterparty> =
            records.get_by_id("missing").await.into();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("Client non trouvé"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "Client non trouvé" })
        );
    }
}
