//! Store wrappers shared by repository tests.

use async_trait::async_trait;

use crate::store::{Collection, Document, DocumentStore, Query, StoreResult};

/// Serves list requests without a limit at a fixed default page size, the
/// way hosted document APIs do.
pub(crate) struct DefaultPageStore<S> {
    inner: S,
    default_limit: usize,
}

impl<S> DefaultPageStore<S> {
    pub(crate) fn new(inner: S, default_limit: usize) -> Self {
        Self {
            inner,
            default_limit,
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for DefaultPageStore<S> {
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        self.inner.create(collection, id, data).await
    }

    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document> {
        self.inner.get(collection, id).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        self.inner.update(collection, id, data).await
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        self.inner.upsert(collection, id, data).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        self.inner.delete(collection, id).await
    }

    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let mut query = query.clone();
        if query.limit.is_none() {
            query.limit = Some(self.default_limit);
        }
        self.inner.list(collection, &query).await
    }
}
