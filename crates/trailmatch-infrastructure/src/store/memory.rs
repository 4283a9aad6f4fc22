//! In-process document store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, Document, DocumentStore, ID_FIELD, Query, StoreError, StoreResult};

/// Document store held in memory.
///
/// Used by tests and by the server when no hosted store is configured.
/// Unlike the default trait implementation, `upsert` here is a single
/// locked operation.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }

    fn with_id(id: &str, mut data: Document) -> Document {
        data.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        data
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.contains_key(id) {
            return Err(StoreError::already_exists(collection, id));
        }
        let document = Self::with_id(id, data);
        documents.insert(id.to_string(), document.clone());
        Ok(document)
    }

    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .and_then(|documents| documents.get(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(&collection)
            .and_then(|documents| documents.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        for (field, value) in data {
            if field != ID_FIELD {
                document.insert(field, value);
            }
        }
        Ok(document.clone())
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        let document = documents
            .entry(id.to_string())
            .or_insert_with(|| Self::with_id(id, Document::new()));
        for (field, value) in data {
            if field != ID_FIELD {
                document.insert(field, value);
            }
        }
        Ok(document.clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        if let Some(documents) = self.collections.write().await.get_mut(&collection) {
            documents.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(&collection)
            .map(|documents| documents.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        Ok(query.apply(documents))
    }
}
