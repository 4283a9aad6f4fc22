//! Account use cases: signup, login, user edits and account deletion.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use trailmatch_core::error::Result;
use trailmatch_core::form::FormSchema;
use trailmatch_core::matching::MatchRepository;
use trailmatch_core::profile::{ProfileRepository, UserProfile};
use trailmatch_core::user::{Credential, CredentialRepository, User, UserRepository};
use trailmatch_core::validation::Rule;
use trailmatch_core::validation::birthdate::parse_birthdate;
use trailmatch_core::validation::email::normalize_email;
use trailmatch_core::{Lookup, TrailmatchError};
use uuid::Uuid;

use crate::password::{hash_password, verify_password};

/// Signup payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// `YYYY-MM-DD`. Checked against the minimum age when present.
    #[serde(default)]
    pub birthdate: Option<String>,
}

/// Partial update of a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Use case for account lifecycle.
///
/// # Responsibilities
///
/// - Creating a user, its login credential and an empty profile at signup
/// - Verifying credentials at login
/// - Editing name and email, keeping the credential in step
/// - Removing every document that belongs to a user on deletion
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialRepository>,
    profiles: Arc<dyn ProfileRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialRepository>,
        profiles: Arc<dyn ProfileRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            users,
            credentials,
            profiles,
            matches,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// - `Validation` if any field fails its rule
    /// - `Conflict` if the email is already registered
    pub async fn signup(&self, request: SignupRequest) -> Result<User> {
        let mut schema = FormSchema::new()
            .field("name", Rule::Name)
            .field("email", Rule::Email)
            .field("password", Rule::Password);
        let mut values = HashMap::from([
            ("name".to_string(), request.name.clone()),
            ("email".to_string(), request.email.clone()),
            ("password".to_string(), request.password.clone()),
        ]);
        let birthdate = request.birthdate.filter(|b| !b.trim().is_empty());
        if let Some(birthdate) = &birthdate {
            schema = schema.field("birthdate", Rule::Birthdate);
            values.insert("birthdate".to_string(), birthdate.clone());
        }
        schema.validate(&values)?;

        let email = normalize_email(&request.email);
        match self.users.find_by_email(&email).await {
            Lookup::Found(_) => {
                tracing::info!("Signup rejected: {} is already registered", email);
                return Err(TrailmatchError::Conflict(
                    "An account with this email already exists".to_string(),
                ));
            }
            Lookup::NotFound => {}
            Lookup::Failed(e) => return Err(e),
        }

        let user = User::new(Uuid::new_v4().to_string(), request.name.trim(), email.clone());
        let credential = Credential {
            email,
            password_hash: hash_password(&request.password)?,
            user_id: user.user_id.clone(),
        };
        let mut profile = UserProfile::empty(&user.user_id);
        profile.birthdate = birthdate.as_deref().map(parse_birthdate).transpose()?;

        self.users.create(&user).await?;
        if let Err(e) = self.attach_login(&credential, &profile).await {
            tracing::warn!("Signup for {} failed after user creation: {}", user.user_id, e);
            self.rollback_signup(&user).await;
            return Err(e);
        }

        tracing::info!("Account created for user {}", user.user_id);
        Ok(user)
    }

    async fn attach_login(&self, credential: &Credential, profile: &UserProfile) -> Result<()> {
        self.credentials.store(credential).await?;
        self.profiles.create(profile).await?;
        Ok(())
    }

    /// Removes what a failed signup already wrote, so the email can sign up
    /// again. Cleanup failures are logged; the signup error is what the
    /// caller sees.
    async fn rollback_signup(&self, user: &User) {
        if let Err(e) = self.profiles.delete(&user.user_id).await {
            tracing::error!("Rollback: failed to delete profile {}: {}", user.user_id, e);
        }
        if let Err(e) = self.credentials.delete(&user.email).await {
            tracing::error!("Rollback: failed to delete credential for {}: {}", user.email, e);
        }
        if let Err(e) = self.users.delete(&user.user_id).await {
            tracing::error!("Rollback: failed to delete user {}: {}", user.user_id, e);
        }
    }

    /// Checks an email/password pair and returns the user.
    ///
    /// # Errors
    ///
    /// - `Validation` if either field is empty
    /// - `Unauthorized` if no account matches or the password is wrong
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let mut values = HashMap::new();
        values.insert("email".to_string(), email.to_string());
        values.insert("password".to_string(), password.to_string());
        FormSchema::login().validate(&values)?;

        let email = normalize_email(email);
        let credential = match self.credentials.find(&email).await {
            Lookup::Found(credential) => credential,
            Lookup::NotFound => {
                tracing::debug!("Login failed: no credential for {}", email);
                return Err(TrailmatchError::Unauthorized);
            }
            Lookup::Failed(e) => return Err(e),
        };

        if !verify_password(password, &credential.password_hash)? {
            tracing::debug!("Login failed: wrong password for {}", email);
            return Err(TrailmatchError::Unauthorized);
        }

        self.users
            .get_by_id(&credential.user_id)
            .await
            .require("user", &credential.user_id)
    }

    pub async fn get_user(&self, user_id: &str) -> Lookup<User> {
        self.users.get_by_id(user_id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    /// - `Validation` if a provided field fails its rule
    /// - `Conflict` if the new email belongs to another account
    pub async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        let mut user = self.users.get_by_id(user_id).await.require("user", user_id)?;
        let previous_email = user.email.clone();

        let mut schema = FormSchema::new();
        let mut values = HashMap::new();
        if let Some(name) = &update.name {
            schema = schema.field("name", Rule::Name);
            values.insert("name".to_string(), name.clone());
        }
        if let Some(email) = &update.email {
            schema = schema.field("email", Rule::Email);
            values.insert("email".to_string(), email.clone());
        }
        schema.validate(&values)?;

        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            let email = normalize_email(&email);
            if email != previous_email {
                match self.users.find_by_email(&email).await {
                    Lookup::Found(other) if other.user_id != user.user_id => {
                        return Err(TrailmatchError::Conflict(
                            "An account with this email already exists".to_string(),
                        ));
                    }
                    Lookup::Failed(e) => return Err(e),
                    _ => {}
                }
            }
            user.email = email;
        }

        let updated = self.users.update(&user).await?;

        if updated.email != previous_email {
            match self.credentials.find(&previous_email).await {
                Lookup::Found(mut credential) => {
                    credential.email = updated.email.clone();
                    self.credentials.store(&credential).await?;
                }
                Lookup::NotFound => {
                    tracing::warn!("User {} has no credential to move", updated.user_id);
                }
                Lookup::Failed(e) => return Err(e),
            }
        }

        Ok(updated)
    }

    /// Deletes a user and everything that hangs off it.
    ///
    /// Deleting an account that does not exist succeeds, so a retried
    /// request after a partial failure finishes the cleanup.
    pub async fn delete_account(&self, user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(TrailmatchError::validation("userId is required"));
        }

        match self.users.get_by_id(user_id).await {
            Lookup::Found(user) => self.credentials.delete(&user.email).await?,
            Lookup::NotFound => {
                tracing::debug!("Deleting account {} with no user document", user_id)
            }
            Lookup::Failed(e) => return Err(e),
        }
        self.matches.delete_for_user(user_id).await?;
        self.profiles.delete(user_id).await?;
        self.users.delete(user_id).await?;

        tracing::info!("Deleted account {}", user_id);
        Ok(())
    }
}
