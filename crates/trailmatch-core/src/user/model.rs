//! User domain model.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `user_id` is the stable external identity and doubles as the key of the
/// matching [`UserProfile`](crate::profile::UserProfile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Login credential stored apart from the public user record.
///
/// Stored under the owner's `user_id`. `email` is the normalized
/// (lowercased, trimmed) address it is looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub user_id: String,
}
