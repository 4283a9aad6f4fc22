//! Match domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    /// Only one side has swiped.
    Pending,
    /// Both sides swiped on each other.
    Accepted,
    Rejected,
}

/// One directed swipe from `user_id` onto `matched_user_id`.
///
/// Matches are append-only: a new swipe creates a new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub user_id: String,
    pub matched_user_id: String,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        user_id: impl Into<String>,
        matched_user_id: impl Into<String>,
        status: MatchStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            matched_user_id: matched_user_id.into(),
            status,
            created_at,
        }
    }

    /// Document key for the directed pair.
    pub fn document_id(user_id: &str, matched_user_id: &str) -> String {
        format!("{}_{}", user_id, matched_user_id)
    }

    pub fn id(&self) -> String {
        Self::document_id(&self.user_id, &self.matched_user_id)
    }
}
