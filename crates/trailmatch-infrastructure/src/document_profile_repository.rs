//! DocumentStore-based ProfileRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use trailmatch_core::Lookup;
use trailmatch_core::error::Result;
use trailmatch_core::profile::{ProfileRepository, UserProfile};

use crate::dto::UserProfileDTO;
use crate::store::{Collection, DocumentStore, to_document};
use crate::store_repository::{StoreRepository, access_error, fetch};

/// Profiles in the `userprofile` collection, keyed by `user_id`.
///
/// Writes go through [`DocumentStore::upsert`], so atomicity depends on the
/// store: the memory store is atomic, the REST store is not.
pub struct DocumentProfileRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentProfileRepository {
    const COLLECTION: Collection = Collection::UserProfile;
    const ENTITY_NAME: &'static str = "profile";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentProfileRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for DocumentProfileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<UserProfile> {
        let data = to_document(&UserProfileDTO::from_domain(profile)?)
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .create(Self::COLLECTION, &profile.user_id, data)
            .await
            .map_err(access_error("create", Self::ENTITY_NAME))?;
        Ok(profile.clone())
    }

    async fn get_by_id(&self, user_id: &str) -> Lookup<UserProfile> {
        let lookup = fetch::<UserProfileDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            Self::ENTITY_NAME,
            user_id,
        )
        .await;
        match lookup {
            Lookup::Found(dto) => match UserProfile::try_from(dto) {
                Ok(profile) => Lookup::Found(profile),
                Err(e) => {
                    tracing::error!("Unreadable profile '{}': {}", user_id, e);
                    Lookup::Failed(e)
                }
            },
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(e) => Lookup::Failed(e),
        }
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile> {
        let data = to_document(&UserProfileDTO::from_domain(profile)?)
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .upsert(Self::COLLECTION, &profile.user_id, data)
            .await
            .map_err(access_error("upsert", Self::ENTITY_NAME))?;
        tracing::debug!("Upserted profile {}", profile.user_id);
        Ok(profile.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.store
            .delete(Self::COLLECTION, user_id)
            .await
            .map_err(access_error("delete", Self::ENTITY_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, MemoryDocumentStore, Query, StoreError, StoreResult};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use trailmatch_core::profile::{AdventurePreference, SkillLevel};

    /// Update is always refused; creates are recorded and kept.
    #[derive(Default)]
    struct RejectingUpdateStore {
        created: Mutex<Vec<(String, Document)>>,
    }

    #[async_trait]
    impl DocumentStore for RejectingUpdateStore {
        async fn create(&self, _: Collection, id: &str, data: Document) -> StoreResult<Document> {
            self.created
                .lock()
                .unwrap()
                .push((id.to_string(), data.clone()));
            Ok(data)
        }
        async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document> {
            Err(StoreError::not_found(collection, id))
        }
        async fn update(&self, _: Collection, _: &str, _: Document) -> StoreResult<Document> {
            Err(StoreError::Rejected("Document with the requested ID could not be found".to_string()))
        }
        async fn delete(&self, _: Collection, _: &str) -> StoreResult<()> {
            Ok(())
        }
        async fn list(&self, _: Collection, _: &Query) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }
    }

    fn sample_profile() -> UserProfile {
        let mut profile = UserProfile::empty("u1");
        profile.bio = Some("Weekend climber".to_string());
        profile
            .adventure_preferences
            .insert(AdventurePreference::Climbing);
        profile
            .skill_summary
            .insert("climbing".to_string(), SkillLevel::Intermediate);
        profile
    }

    #[tokio::test]
    async fn test_upsert_falls_back_to_create_with_same_payload() {
        let store = Arc::new(RejectingUpdateStore::default());
        let repo = DocumentProfileRepository::new(store.clone());
        let profile = sample_profile();

        let stored = repo.upsert(&profile).await.unwrap();
        assert_eq!(stored, profile);

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "u1");
        let expected = to_document(&UserProfileDTO::from_domain(&profile).unwrap()).unwrap();
        assert_eq!(created[0].1, expected);
        assert_eq!(created[0].1["instagram_url"], Value::Null);
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let repo = DocumentProfileRepository::new(Arc::new(MemoryDocumentStore::new()));
        let mut profile = sample_profile();
        repo.create(&UserProfile::empty("u1")).await.unwrap();

        repo.upsert(&profile).await.unwrap();
        assert_eq!(repo.get_by_id("u1").await, Lookup::Found(profile.clone()));

        profile.bio = None;
        repo.upsert(&profile).await.unwrap();
        let fetched = repo.get_by_id("u1").await.into_option().unwrap();
        assert_eq!(fetched.bio, None);
    }

    #[tokio::test]
    async fn test_malformed_skill_summary_fails_lookup() {
        let store = Arc::new(MemoryDocumentStore::new());
        let data = json!({
            "user_id": "u1",
            "bio": null,
            "adventure_preferences": [],
            "skill_summary": "{\"climbing\": ",
            "profile_image_url": null,
            "birthdate": null,
            "instagram_url": null,
            "facebook_url": null,
            "dating_preference": null
        });
        store
            .create(Collection::UserProfile, "u1", data.as_object().cloned().unwrap())
            .await
            .unwrap();
        let repo = DocumentProfileRepository::new(store);

        match repo.get_by_id("u1").await {
            Lookup::Failed(e) => assert!(e.is_serialization()),
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
