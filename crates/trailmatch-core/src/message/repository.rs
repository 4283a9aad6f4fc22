//! Messaging repository traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Conversation, Message};
use crate::error::Result;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a message.
    async fn create(&self, message: &Message) -> Result<Message>;

    /// Returns every message exchanged between `a` and `b`, oldest first.
    ///
    /// Implementations must exclude messages where only one of the two
    /// takes part.
    async fn get_conversation(&self, a: &str, b: &str) -> Result<Vec<Message>>;

    /// Returns every message sent or received by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Message>>;
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Creates the conversation for the pair or bumps its timestamp.
    async fn touch(&self, a: &str, b: &str, at: DateTime<Utc>) -> Result<Conversation>;

    /// Conversations `user_id` takes part in, most recent first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>>;
}
