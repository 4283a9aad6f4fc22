//! Swipe matching use cases.

use std::sync::Arc;

use chrono::Utc;
use trailmatch_core::error::Result;
use trailmatch_core::matching::{Match, MatchRepository, MatchStatus};
use trailmatch_core::{Lookup, TrailmatchError};

/// Use case for recording swipes and reading match state.
pub struct MatchService {
    matches: Arc<dyn MatchRepository>,
}

impl MatchService {
    pub fn new(matches: Arc<dyn MatchRepository>) -> Self {
        Self { matches }
    }

    /// Records that `user_id` swiped right on `matched_user_id`.
    ///
    /// The new match is `Accepted` when the other user already swiped back,
    /// otherwise `Pending`.
    ///
    /// # Errors
    ///
    /// - `Validation` if either ID is empty or both are the same user
    /// - `Conflict` if this swipe was already recorded
    pub async fn swipe(&self, user_id: &str, matched_user_id: &str) -> Result<Match> {
        let mut errors = Vec::new();
        if user_id.trim().is_empty() {
            errors.push("userId is required".to_string());
        }
        if matched_user_id.trim().is_empty() {
            errors.push("matchedUserId is required".to_string());
        }
        if errors.is_empty() && user_id == matched_user_id {
            errors.push("Cannot match with yourself".to_string());
        }
        if !errors.is_empty() {
            return Err(TrailmatchError::Validation(errors));
        }

        let status = match self.matches.get_status(matched_user_id, user_id).await {
            Lookup::Found(_) => MatchStatus::Accepted,
            Lookup::NotFound => MatchStatus::Pending,
            Lookup::Failed(e) => return Err(e),
        };

        self.matches
            .create(&Match::new(user_id, matched_user_id, status, Utc::now()))
            .await
    }

    pub async fn list_matches(&self, user_id: &str) -> Result<Vec<Match>> {
        self.matches.list_for_user(user_id).await
    }

    pub async fn match_status(&self, user_id: &str, matched_user_id: &str) -> Lookup<Match> {
        self.matches.get_status(user_id, matched_user_id).await
    }
}
