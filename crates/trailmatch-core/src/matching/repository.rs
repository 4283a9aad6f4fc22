//! Match repository trait.

use async_trait::async_trait;

use super::model::Match;
use crate::error::Result;
use crate::lookup::Lookup;

#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Stores a new swipe.
    async fn create(&self, record: &Match) -> Result<Match>;

    /// Lists swipes made by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Match>>;

    /// Reads the swipe from `user_id` onto `matched_user_id`.
    async fn get_status(&self, user_id: &str, matched_user_id: &str) -> Lookup<Match>;

    /// Removes every swipe made by or onto `user_id`.
    async fn delete_for_user(&self, user_id: &str) -> Result<()>;
}
