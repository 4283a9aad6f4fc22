//! Match DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trailmatch_core::matching::{Match, MatchStatus};

/// Stored form of a `matches` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDTO {
    pub user_id: String,
    pub matched_user_id: String,
    pub status: MatchStatus,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<&Match> for MatchDTO {
    fn from(record: &Match) -> Self {
        Self {
            user_id: record.user_id.clone(),
            matched_user_id: record.matched_user_id.clone(),
            status: record.status,
            created_at: record.created_at,
        }
    }
}

impl From<MatchDTO> for Match {
    fn from(dto: MatchDTO) -> Self {
        Match::new(dto.user_id, dto.matched_user_id, dto.status, dto.created_at)
    }
}
