//! DocumentStore-based UserRepository and CredentialRepository implementations

use std::sync::Arc;

use async_trait::async_trait;
use trailmatch_core::error::Result;
use trailmatch_core::user::{Credential, CredentialRepository, User, UserRepository};
use trailmatch_core::{Lookup, TrailmatchError};

use crate::dto::{CredentialDTO, UserDTO};
use crate::store::{Collection, DocumentStore, Filter, Query, to_document};
use crate::store_repository::{StoreRepository, access_error, decode_all, fetch, list_all};

/// Users stored one document per user in the `user` collection, keyed by
/// `user_id`.
pub struct DocumentUserRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentUserRepository {
    const COLLECTION: Collection = Collection::User;
    const ENTITY_NAME: &'static str = "user";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let data = to_document(&UserDTO::from(user)).map_err(access_error("encode", "user"))?;
        self.store
            .create(Self::COLLECTION, &user.user_id, data)
            .await
            .map_err(access_error("create", Self::ENTITY_NAME))?;
        tracing::info!("Created user {}", user.user_id);
        Ok(user.clone())
    }

    async fn get_by_id(&self, user_id: &str) -> Lookup<User> {
        fetch::<UserDTO>(self.document_store().as_ref(), Self::COLLECTION, Self::ENTITY_NAME, user_id)
            .await
            .map(User::from)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let data = to_document(&UserDTO::from(user)).map_err(access_error("encode", "user"))?;
        match self.store.update(Self::COLLECTION, &user.user_id, data).await {
            Ok(_) => Ok(user.clone()),
            Err(e) if e.is_not_found() => {
                Err(TrailmatchError::not_found(Self::ENTITY_NAME, &user.user_id))
            }
            Err(e) => Err(access_error("update", Self::ENTITY_NAME)(e)),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.store
            .delete(Self::COLLECTION, user_id)
            .await
            .map_err(access_error("delete", Self::ENTITY_NAME))
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = list_all::<UserDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            &Query::new(),
            "users",
        )
        .await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> Lookup<User> {
        let query = Query::new()
            .filter(Filter::equal("email", email))
            .page(1, 0);
        let documents = match self.store.list(Self::COLLECTION, &query).await {
            Ok(documents) => documents,
            Err(e) => return Lookup::Failed(access_error("find", Self::ENTITY_NAME)(e)),
        };
        match decode_all::<UserDTO>(documents) {
            Ok(users) => match users.into_iter().next() {
                Some(dto) => Lookup::Found(dto.into()),
                None => Lookup::NotFound,
            },
            Err(e) => Lookup::Failed(e),
        }
    }
}

/// Login credentials in the `credentials` collection.
///
/// Keyed by `user_id` and looked up by email, since email addresses are not
/// valid document IDs in every store.
pub struct DocumentCredentialRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentCredentialRepository {
    const COLLECTION: Collection = Collection::Credentials;
    const ENTITY_NAME: &'static str = "credential";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentCredentialRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialRepository for DocumentCredentialRepository {
    async fn store(&self, credential: &Credential) -> Result<()> {
        let data = to_document(&CredentialDTO::from(credential))
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .upsert(Self::COLLECTION, &credential.user_id, data)
            .await
            .map_err(access_error("store", Self::ENTITY_NAME))?;
        Ok(())
    }

    async fn find(&self, email: &str) -> Lookup<Credential> {
        let query = Query::new()
            .filter(Filter::equal("email", email))
            .page(1, 0);
        let documents = match self.store.list(Self::COLLECTION, &query).await {
            Ok(documents) => documents,
            Err(e) => return Lookup::Failed(access_error("find", Self::ENTITY_NAME)(e)),
        };
        match decode_all::<CredentialDTO>(documents) {
            Ok(found) => match found.into_iter().next() {
                Some(dto) => Lookup::Found(dto.into()),
                None => Lookup::NotFound,
            },
            Err(e) => Lookup::Failed(e),
        }
    }

    async fn delete(&self, email: &str) -> Result<()> {
        match self.find(email).await {
            Lookup::Found(credential) => self
                .store
                .delete(Self::COLLECTION, &credential.user_id)
                .await
                .map_err(access_error("delete", Self::ENTITY_NAME)),
            Lookup::NotFound => Ok(()),
            Lookup::Failed(e) => Err(e),
        }
    }
}
