//! Conversation DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trailmatch_core::message::Conversation;

/// Stored form of a `conversations` document.
///
/// Participants are flattened into two fields so the store can filter on
/// either one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDTO {
    pub conversation_id: String,
    pub participant_a: String,
    pub participant_b: String,
    #[serde(with = "super::timestamp")]
    pub last_message_timestamp: DateTime<Utc>,
}

impl From<&Conversation> for ConversationDTO {
    fn from(conversation: &Conversation) -> Self {
        Self {
            conversation_id: conversation.conversation_id.clone(),
            participant_a: conversation.participants.0.clone(),
            participant_b: conversation.participants.1.clone(),
            last_message_timestamp: conversation.last_message_timestamp,
        }
    }
}

impl From<ConversationDTO> for Conversation {
    fn from(dto: ConversationDTO) -> Self {
        Conversation {
            conversation_id: dto.conversation_id,
            participants: (dto.participant_a, dto.participant_b),
            last_message_timestamp: dto.last_message_timestamp,
        }
    }
}
