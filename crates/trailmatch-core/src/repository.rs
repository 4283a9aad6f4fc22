//! Repository trait re-exports.
//!
//! This module provides centralized access to all repository traits.

pub use crate::matching::MatchRepository;
pub use crate::message::{ConversationRepository, MessageRepository};
pub use crate::profile::ProfileRepository;
pub use crate::user::{CredentialRepository, UserRepository};
