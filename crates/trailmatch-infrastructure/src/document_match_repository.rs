//! DocumentStore-based MatchRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use trailmatch_core::Lookup;
use trailmatch_core::error::Result;
use trailmatch_core::matching::{Match, MatchRepository};

use crate::dto::MatchDTO;
use crate::store::{Collection, DocumentStore, Filter, Order, Query, to_document};
use crate::store_repository::{StoreRepository, access_error, fetch, list_all};

/// Swipes in the `matches` collection.
///
/// Document IDs are `"{user_id}_{matched_user_id}"`, so a pair can be read
/// directly without a query.
pub struct DocumentMatchRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentMatchRepository {
    const COLLECTION: Collection = Collection::Matches;
    const ENTITY_NAME: &'static str = "match";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentMatchRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MatchRepository for DocumentMatchRepository {
    async fn create(&self, record: &Match) -> Result<Match> {
        let data = to_document(&MatchDTO::from(record))
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .create(Self::COLLECTION, &record.id(), data)
            .await
            .map_err(access_error("create", Self::ENTITY_NAME))?;
        tracing::info!(
            "Recorded match {} -> {} ({})",
            record.user_id,
            record.matched_user_id,
            record.status
        );
        Ok(record.clone())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Match>> {
        let query = Query::new()
            .filter(Filter::equal("user_id", user_id))
            .order_by("created_at", Order::Desc);
        let mut matches: Vec<Match> = list_all::<MatchDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            &query,
            "matches",
        )
        .await?
        .into_iter()
        .map(Match::from)
        .collect();
        // Most recent first, whatever order the store returned
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn get_status(&self, user_id: &str, matched_user_id: &str) -> Lookup<Match> {
        fetch::<MatchDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            Self::ENTITY_NAME,
            &Match::document_id(user_id, matched_user_id),
        )
        .await
        .map(Match::from)
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<()> {
        let query = Query::new()
            .filter(Filter::Or(vec![
                Filter::equal("user_id", user_id),
                Filter::equal("matched_user_id", user_id),
            ]))
            .order_by("created_at", Order::Asc);
        // Collect every page before deleting so removals cannot shift the
        // offsets still to be read.
        let records = list_all::<MatchDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            &query,
            "matches",
        )
        .await?;
        for record in records {
            let id = Match::document_id(&record.user_id, &record.matched_user_id);
            self.store
                .delete(Self::COLLECTION, &id)
                .await
                .map_err(access_error("delete", Self::ENTITY_NAME))?;
        }
        Ok(())
    }
}
