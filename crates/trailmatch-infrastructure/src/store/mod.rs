//! Document store abstraction.
//!
//! The backing BaaS is reached only through [`DocumentStore`]. Documents are
//! schema-loose JSON objects addressed by collection and ID.
//!
//! # Module Structure
//!
//! - `collection`: Collection names
//! - `query`: Filters, ordering and paging
//! - `memory`: In-process store for tests and local runs
//! - `rest`: HTTP client for the hosted document API

mod collection;
mod memory;
mod query;
mod rest;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use trailmatch_core::TrailmatchError;

pub use collection::Collection;
pub use memory::MemoryDocumentStore;
pub use query::{Filter, Order, Query};
pub use rest::RestDocumentStore;

/// Field holding the document ID inside a stored document.
pub const ID_FIELD: &str = "$id";

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Errors reported by a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },

    #[error("Document '{id}' already exists in '{collection}'")]
    AlreadyExists { collection: String, id: String },

    /// The store refused the request (bad payload, permissions, ...).
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or timed out.
    #[error("{0}")]
    Unavailable(String),

    /// The store answered with something that is not a document.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn not_found(collection: Collection, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: Collection, id: &str) -> Self {
        Self::AlreadyExists {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for TrailmatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(message) => TrailmatchError::Unavailable(message),
            StoreError::Malformed(message) => TrailmatchError::json(message),
            StoreError::AlreadyExists { .. } => TrailmatchError::Conflict(err.to_string()),
            StoreError::NotFound { .. } | StoreError::Rejected(_) => {
                TrailmatchError::DataAccess(err.to_string())
            }
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// CRUD access to a document database.
///
/// Every write touches exactly one document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with the given ID. Fails with
    /// [`StoreError::AlreadyExists`] if the ID is taken.
    async fn create(&self, collection: Collection, id: &str, data: Document)
    -> StoreResult<Document>;

    /// Reads one document.
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document>;

    /// Merges `data` into an existing document. Fails with
    /// [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: Collection, id: &str, data: Document)
    -> StoreResult<Document>;

    /// Writes a document whether or not it exists yet.
    ///
    /// The default tries `update` and, on any failure, `create` with the
    /// same payload. That is two requests, not one: a delete landing between
    /// them resurrects the document. Stores with a conditional write should
    /// override this.
    async fn upsert(&self, collection: Collection, id: &str, data: Document)
    -> StoreResult<Document> {
        match self.update(collection, id, data.clone()).await {
            Ok(document) => Ok(document),
            Err(e) => {
                tracing::debug!(
                    "Update of {}/{} failed ({}), falling back to create",
                    collection,
                    id,
                    e
                );
                self.create(collection, id, data).await
            }
        }
    }

    /// Deletes a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()>;

    /// Lists documents matching `query`.
    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>>;
}

/// Serializes a DTO into a document body.
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Malformed(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(StoreError::Malformed(e.to_string())),
    }
}

/// Deserializes a stored document into a DTO. Store metadata fields are ignored.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, TrailmatchError> {
    serde_json::from_value(Value::Object(document)).map_err(TrailmatchError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// A store whose `update` always fails, recording what reaches `create`.
    #[derive(Default)]
    struct RejectingUpdateStore {
        created: Mutex<Vec<(String, Document)>>,
    }

    #[async_trait]
    impl DocumentStore for RejectingUpdateStore {
        async fn create(
            &self,
            _collection: Collection,
            id: &str,
            data: Document,
        ) -> StoreResult<Document> {
            self.created
                .lock()
                .unwrap()
                .push((id.to_string(), data.clone()));
            Ok(data)
        }

        async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document> {
            Err(StoreError::not_found(collection, id))
        }

        async fn update(
            &self,
            _collection: Collection,
            _id: &str,
            _data: Document,
        ) -> StoreResult<Document> {
            Err(StoreError::Rejected("document_not_found".to_string()))
        }

        async fn delete(&self, _collection: Collection, _id: &str) -> StoreResult<()> {
            Ok(())
        }

        async fn list(&self, _collection: Collection, _query: &Query) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_default_upsert_falls_back_to_create() {
        let store = RejectingUpdateStore::default();
        let mut data = Document::new();
        data.insert("bio".to_string(), Value::String("Climber".to_string()));

        let stored = store
            .upsert(Collection::UserProfile, "u1", data.clone())
            .await
            .unwrap();

        assert_eq!(stored, data);
        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0], ("u1".to_string(), data));
    }

    #[test]
    fn test_store_error_mapping() {
        let err: TrailmatchError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(err.is_transient());

        let err: TrailmatchError = StoreError::already_exists(Collection::User, "u1").into();
        assert!(matches!(err, TrailmatchError::Conflict(_)));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        assert!(to_document(&serde_json::json!({"a": 1})).is_ok());
    }
}
