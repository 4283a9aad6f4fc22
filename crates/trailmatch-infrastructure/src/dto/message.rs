//! Message DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trailmatch_core::message::Message;

/// Stored form of a `messages` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDTO {
    pub message_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    /// Written as `null` for messages sent before conversations existed.
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageDTO {
    fn from(message: &Message) -> Self {
        Self {
            message_id: message.message_id.clone(),
            sender_id: message.sender_id.clone(),
            receiver_id: message.receiver_id.clone(),
            content: message.content.clone(),
            conversation_id: message.conversation_id.clone(),
            created_at: message.created_at,
        }
    }
}

impl From<MessageDTO> for Message {
    fn from(dto: MessageDTO) -> Self {
        Message {
            message_id: dto.message_id,
            sender_id: dto.sender_id,
            receiver_id: dto.receiver_id,
            content: dto.content,
            conversation_id: dto.conversation_id,
            created_at: dto.created_at,
        }
    }
}
