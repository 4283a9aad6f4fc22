use std::sync::Arc;

use serde::de::DeserializeOwned;
use trailmatch_core::{Lookup, TrailmatchError};

use crate::store::{Collection, Document, DocumentStore, Query, StoreError, from_document};

/// Documents requested per page when reading a whole result set.
pub const PAGE_SIZE: usize = 100;

/// Common trait for repositories backed by a [`DocumentStore`].
///
/// Each implementor owns exactly one collection.
pub trait StoreRepository {
    /// The collection this repository reads and writes
    const COLLECTION: Collection;

    /// The entity name used in error messages
    const ENTITY_NAME: &'static str;

    /// Returns the underlying store
    fn document_store(&self) -> &Arc<dyn DocumentStore>;
}

/// Reads one document and decodes it into `D`.
///
/// A missing document is `NotFound`. A store failure or an unreadable
/// document is `Failed`.
pub(crate) async fn fetch<D: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    entity: &str,
    id: &str,
) -> Lookup<D> {
    match store.get(collection, id).await {
        Ok(document) => match from_document::<D>(document) {
            Ok(dto) => Lookup::Found(dto),
            Err(e) => {
                tracing::error!("Unreadable {} document '{}': {}", entity, id, e);
                Lookup::Failed(e)
            }
        },
        Err(e) if e.is_not_found() => Lookup::NotFound,
        Err(e) => {
            tracing::warn!("Failed to load {} '{}': {}", entity, id, e);
            Lookup::Failed(e.into())
        }
    }
}

/// Decodes a list of documents, failing on the first unreadable one.
pub(crate) fn decode_all<D: DeserializeOwned>(
    documents: Vec<Document>,
) -> Result<Vec<D>, TrailmatchError> {
    documents.into_iter().map(from_document).collect()
}

/// Reads every document matching `query`, one page at a time.
///
/// Any window already on `query` is replaced. A store serves unpaged
/// requests with its own default page size, so whole-set reads always page.
pub(crate) async fn list_all<D: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    query: &Query,
    entity: &str,
) -> Result<Vec<D>, TrailmatchError> {
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = query.clone().page(PAGE_SIZE, offset);
        let documents = store
            .list(collection, &page)
            .await
            .map_err(access_error("list", entity))?;
        let fetched = documents.len();
        items.extend(decode_all::<D>(documents)?);
        if fetched < PAGE_SIZE {
            break;
        }
        offset += fetched;
    }
    tracing::debug!("Listed {} {} from {}", items.len(), entity, collection);
    Ok(items)
}

/// Wraps a store error with the operation that failed.
///
/// Outages stay `Unavailable` and duplicates stay `Conflict`; everything
/// else becomes `DataAccess` with the store's message preserved.
pub(crate) fn access_error(operation: &str, entity: &str) -> impl FnOnce(StoreError) -> TrailmatchError {
    let context = format!("Failed to {} {}", operation, entity);
    move |e| match TrailmatchError::from(e) {
        TrailmatchError::Unavailable(message) => {
            TrailmatchError::Unavailable(format!("{}: {}", context, message))
        }
        TrailmatchError::Conflict(message) => TrailmatchError::Conflict(message),
        other => TrailmatchError::DataAccess(format!("{}: {}", context, other)),
    }
}
