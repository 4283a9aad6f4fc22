//! User repository traits.

use async_trait::async_trait;

use super::model::{Credential, User};
use crate::error::Result;
use crate::lookup::Lookup;

/// An abstract repository for user accounts.
///
/// Each write is a single document operation, so a failed write never
/// leaves a partial record behind.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates the user document keyed by `user.user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(User)`: The stored user
    /// - `Err(_)`: The store rejected the write; its message is preserved
    async fn create(&self, user: &User) -> Result<User>;

    /// Reads a user by ID.
    ///
    /// Never fails: a store error comes back as [`Lookup::Failed`].
    async fn get_by_id(&self, user_id: &str) -> Lookup<User>;

    /// Replaces the stored name and email.
    async fn update(&self, user: &User) -> Result<User>;

    /// Deletes a user (succeeds if it didn't exist).
    async fn delete(&self, user_id: &str) -> Result<()>;

    /// Lists every user.
    async fn list(&self) -> Result<Vec<User>>;

    /// Finds a user by email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Lookup<User>;
}

/// Stores password hashes for login.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn store(&self, credential: &Credential) -> Result<()>;

    async fn find(&self, email: &str) -> Lookup<Credential>;

    async fn delete(&self, email: &str) -> Result<()>;
}
