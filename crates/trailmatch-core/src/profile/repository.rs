//! Profile repository trait.

use async_trait::async_trait;

use super::model::UserProfile;
use crate::error::Result;
use crate::lookup::Lookup;

/// Persistence contract for user profiles, keyed by `user_id`.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Creates the profile document. Fails if the store rejects the write.
    async fn create(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Reads a profile by its owner's ID.
    ///
    /// A stored `skill_summary` that is not valid JSON comes back as
    /// `Lookup::Failed` carrying a serialization error.
    async fn get_by_id(&self, user_id: &str) -> Lookup<UserProfile>;

    /// Writes the full profile, creating it when it does not exist yet.
    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Deletes the profile (succeeds if it didn't exist).
    async fn delete(&self, user_id: &str) -> Result<()>;
}
