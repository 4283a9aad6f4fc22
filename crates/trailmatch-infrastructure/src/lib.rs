//! Persistence for Trailmatch.
//!
//! Implements the repository traits from `trailmatch-core` on top of a
//! [`store::DocumentStore`]. Two stores are provided: an in-memory one and a
//! REST client for the hosted document database.

pub mod config;
pub mod document_match_repository;
pub mod document_message_repository;
pub mod document_profile_repository;
pub mod document_user_repository;
pub mod dto;
pub mod store;
pub mod store_repository;

#[cfg(test)]
mod test_support;

pub use crate::config::StoreConfig;
pub use crate::document_match_repository::DocumentMatchRepository;
pub use crate::document_message_repository::{
    DocumentConversationRepository, DocumentMessageRepository,
};
pub use crate::document_profile_repository::DocumentProfileRepository;
pub use crate::document_user_repository::{DocumentCredentialRepository, DocumentUserRepository};
pub use crate::store::{DocumentStore, MemoryDocumentStore, RestDocumentStore};
pub use crate::store_repository::PAGE_SIZE;
