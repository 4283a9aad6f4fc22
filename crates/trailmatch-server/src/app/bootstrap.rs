use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use trailmatch_application::{AccountService, MatchService, MessagingService, ProfileService};
use trailmatch_infrastructure::{
    DocumentConversationRepository, DocumentCredentialRepository, DocumentMatchRepository,
    DocumentMessageRepository, DocumentProfileRepository, DocumentStore, DocumentUserRepository,
    MemoryDocumentStore, RestDocumentStore, StoreConfig,
};

use crate::app::AppState;
use crate::config::{ServerConfig, StoreKind};

pub struct AppBootstrap {
    pub app_state: AppState,
}

impl AppBootstrap {
    /// Builds the application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the REST store is selected but not fully configured.
    pub fn build(config: &ServerConfig) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.store_kind {
            StoreKind::Memory => {
                tracing::warn!("[Bootstrap] Using in-memory document store, data will not persist");
                Arc::new(MemoryDocumentStore::new())
            }
            StoreKind::Rest => {
                let store = RestDocumentStore::new(&config.store)
                    .context("Failed to configure REST document store")?;
                tracing::info!(
                    "[Bootstrap] Using REST document store at {}",
                    config.store.endpoint.as_deref().unwrap_or_default()
                );
                Arc::new(store)
            }
        };

        Ok(Self::with_store(
            store,
            config.store.clone(),
            config.fake_contact_delay,
        ))
    }

    /// Wires every repository and service over one store.
    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        store_config: StoreConfig,
        fake_contact_delay: Duration,
    ) -> Self {
        let users = Arc::new(DocumentUserRepository::new(store.clone()));
        let credentials = Arc::new(DocumentCredentialRepository::new(store.clone()));
        let profiles = Arc::new(DocumentProfileRepository::new(store.clone()));
        let matches = Arc::new(DocumentMatchRepository::new(store.clone()));
        let messages = Arc::new(DocumentMessageRepository::new(store.clone()));
        let conversations = Arc::new(DocumentConversationRepository::new(store));
        tracing::info!("[Bootstrap] Repositories initialized");

        let app_state = AppState {
            account_service: Arc::new(AccountService::new(
                users.clone(),
                credentials,
                profiles.clone(),
                matches.clone(),
            )),
            profile_service: Arc::new(ProfileService::new(profiles, users)),
            match_service: Arc::new(MatchService::new(matches)),
            messaging_service: Arc::new(MessagingService::new(messages, conversations)),
            store_config,
            fake_contact_delay,
        };
        tracing::info!("[Bootstrap] Services initialized");

        Self { app_state }
    }
}
