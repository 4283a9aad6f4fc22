//! Profile use cases.

use std::sync::Arc;

use chrono::Local;
use trailmatch_core::error::Result;
use trailmatch_core::profile::{ProfileRepository, UserProfile};
use trailmatch_core::user::UserRepository;
use trailmatch_core::validation::birthdate::{MINIMUM_AGE, age_on};
use trailmatch_core::{Lookup, TrailmatchError};

/// Longest accepted bio, in characters.
pub const MAX_BIO_LENGTH: usize = 500;

/// Use case for reading and editing profiles.
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }

    pub async fn get_profile(&self, user_id: &str) -> Lookup<UserProfile> {
        self.profiles.get_by_id(user_id).await
    }

    /// Replaces a user's profile with `profile`.
    ///
    /// The path's `user_id` wins over whatever the payload carries. Fields
    /// left `None` are cleared.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    /// - `Validation` if the bio is too long or the birthdate is under age
    pub async fn update_profile(
        &self,
        user_id: &str,
        mut profile: UserProfile,
    ) -> Result<UserProfile> {
        self.users.get_by_id(user_id).await.require("user", user_id)?;
        profile.user_id = user_id.to_string();

        let mut errors = Vec::new();
        let bio_length = profile.bio.as_deref().map_or(0, |bio| bio.chars().count());
        if bio_length > MAX_BIO_LENGTH {
            errors.push(format!("Bio must be at most {} characters", MAX_BIO_LENGTH));
        }
        if let Some(birthdate) = profile.birthdate {
            match age_on(birthdate, Local::now().date_naive()) {
                None => errors.push("Birthdate cannot be in the future".to_string()),
                Some(age) if age < MINIMUM_AGE => {
                    errors.push(format!("You must be at least {} years old", MINIMUM_AGE))
                }
                Some(_) => {}
            }
        }
        if !errors.is_empty() {
            return Err(TrailmatchError::Validation(errors));
        }

        let saved = self.profiles.upsert(&profile).await?;
        tracing::info!("Profile updated for user {}", user_id);
        Ok(saved)
    }
}
