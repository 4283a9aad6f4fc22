//! Messaging use cases.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use trailmatch_core::error::Result;
use trailmatch_core::form::FormSchema;
use trailmatch_core::message::{
    Conversation, ConversationRepository, Message, MessageRepository,
};
use trailmatch_core::TrailmatchError;
use uuid::Uuid;

/// Use case for sending and reading messages.
///
/// Every send also bumps the pair's conversation summary.
pub struct MessagingService {
    messages: Arc<dyn MessageRepository>,
    conversations: Arc<dyn ConversationRepository>,
}

impl MessagingService {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            messages,
            conversations,
        }
    }

    /// Sends a message from `sender_id` to `receiver_id`.
    ///
    /// # Errors
    ///
    /// `Validation` if a participant is missing, the two are the same user,
    /// or the content fails the message rule.
    pub async fn send(&self, sender_id: &str, receiver_id: &str, content: &str) -> Result<Message> {
        let mut errors = Vec::new();
        if sender_id.trim().is_empty() {
            errors.push("senderId is required".to_string());
        }
        if receiver_id.trim().is_empty() {
            errors.push("receiverId is required".to_string());
        }
        if errors.is_empty() && sender_id == receiver_id {
            errors.push("Cannot send a message to yourself".to_string());
        }
        let values = HashMap::from([("content".to_string(), content.to_string())]);
        if let Err(TrailmatchError::Validation(content_errors)) =
            FormSchema::message().validate(&values)
        {
            errors.extend(content_errors);
        }
        if !errors.is_empty() {
            return Err(TrailmatchError::Validation(errors));
        }

        let now = Utc::now();
        let message = Message {
            message_id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.trim().to_string(),
            conversation_id: Some(Conversation::id_for(sender_id, receiver_id)),
            created_at: now,
        };

        let created = self.messages.create(&message).await?;
        self.conversations.touch(sender_id, receiver_id, now).await?;
        tracing::debug!("Message {} sent {} -> {}", created.message_id, sender_id, receiver_id);
        Ok(created)
    }

    /// Every message between two users, oldest first.
    pub async fn get_conversation(&self, user1: &str, user2: &str) -> Result<Vec<Message>> {
        if user1.trim().is_empty() || user2.trim().is_empty() {
            return Err(TrailmatchError::validation("user1 and user2 are required"));
        }
        self.messages.get_conversation(user1, user2).await
    }

    /// Every message a user sent or received, oldest first.
    pub async fn list_messages(&self, user_id: &str) -> Result<Vec<Message>> {
        require_user_id(user_id)?;
        self.messages.list_for_user(user_id).await
    }

    /// Conversations a user takes part in, most recent first.
    pub async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        require_user_id(user_id)?;
        self.conversations.list_for_user(user_id).await
    }
}

fn require_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(TrailmatchError::validation("userId is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmatch_infrastructure::{
        DocumentConversationRepository, DocumentMessageRepository, MemoryDocumentStore,
    };

    fn create_test_service() -> MessagingService {
        let store = Arc::new(MemoryDocumentStore::new());
        MessagingService::new(
            Arc::new(DocumentMessageRepository::new(store.clone())),
            Arc::new(DocumentConversationRepository::new(store)),
        )
    }

    #[tokio::test]
    async fn test_send_and_read_conversation() {
        let service = create_test_service();
        service.send("u1", "u2", "  Up for a climb?  ").await.unwrap();
        service.send("u2", "u1", "Always").await.unwrap();
        service.send("u1", "u3", "Not for u2").await.unwrap();

        let conversation = service.get_conversation("u2", "u1").await.unwrap();
        let mut contents: Vec<&str> = conversation.iter().map(|m| m.content.as_str()).collect();
        contents.sort();
        assert_eq!(contents, vec!["Always", "Up for a climb?"]);
        assert!(conversation[0].created_at <= conversation[1].created_at);
        assert_eq!(
            conversation[0].conversation_id.as_deref(),
            Some("u1__u2")
        );

        let conversations = service.list_conversations("u1").await.unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(service.list_messages("u1").await.unwrap().len(), 3);
        assert_eq!(service.list_messages("u3").await.unwrap().len(), 1);
        assert!(service.list_conversations(" ").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_send_rejects_blank_content() {
        let service = create_test_service();
        let err = service.send("u1", "u2", "   ").await.unwrap_err();
        assert_eq!(
            err,
            TrailmatchError::Validation(vec!["Message cannot be empty".to_string()])
        );
        assert!(service.get_conversation("u1", "u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_self_is_rejected() {
        let service = create_test_service();
        assert!(service.send("u1", "u1", "hi").await.unwrap_err().is_validation());
    }
}
