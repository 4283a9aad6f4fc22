//! DocumentStore-based MessageRepository and ConversationRepository implementations

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use trailmatch_core::error::Result;
use trailmatch_core::message::{
    Conversation, ConversationRepository, Message, MessageRepository,
};

use crate::dto::{ConversationDTO, MessageDTO};
use crate::store::{Collection, DocumentStore, Filter, Order, Query, to_document};
use crate::store_repository::{StoreRepository, access_error, list_all};

/// Messages in the `messages` collection, keyed by `message_id`.
pub struct DocumentMessageRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentMessageRepository {
    const COLLECTION: Collection = Collection::Messages;
    const ENTITY_NAME: &'static str = "message";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentMessageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Reads every page matching `filter`, ordered by `created_at`.
    async fn list_matching(&self, filter: Filter) -> Result<Vec<Message>> {
        let query = Query::new()
            .filter(filter)
            .order_by("created_at", Order::Asc);
        let messages = list_all::<MessageDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            &query,
            "messages",
        )
        .await?;
        Ok(messages.into_iter().map(Message::from).collect())
    }
}

#[async_trait]
impl MessageRepository for DocumentMessageRepository {
    async fn create(&self, message: &Message) -> Result<Message> {
        let data = to_document(&MessageDTO::from(message))
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .create(Self::COLLECTION, &message.message_id, data)
            .await
            .map_err(access_error("create", Self::ENTITY_NAME))?;
        Ok(message.clone())
    }

    async fn get_conversation(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        let pair = Filter::Or(vec![
            Filter::And(vec![
                Filter::equal("sender_id", a),
                Filter::equal("receiver_id", b),
            ]),
            Filter::And(vec![
                Filter::equal("sender_id", b),
                Filter::equal("receiver_id", a),
            ]),
        ]);
        let mut messages: Vec<Message> = self
            .list_matching(pair)
            .await?
            .into_iter()
            .filter(|message| message.is_between(a, b))
            .collect();
        messages.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        tracing::debug!("Loaded {} messages between {} and {}", messages.len(), a, b);
        Ok(messages)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        let involved = Filter::Or(vec![
            Filter::equal("sender_id", user_id),
            Filter::equal("receiver_id", user_id),
        ]);
        let mut messages: Vec<Message> = self
            .list_matching(involved)
            .await?
            .into_iter()
            .filter(|message| message.involves(user_id))
            .collect();
        messages.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        Ok(messages)
    }
}

/// Conversation summaries in the `conversations` collection, keyed by the
/// sorted participant pair.
pub struct DocumentConversationRepository {
    store: Arc<dyn DocumentStore>,
}

impl StoreRepository for DocumentConversationRepository {
    const COLLECTION: Collection = Collection::Conversations;
    const ENTITY_NAME: &'static str = "conversation";
    fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl DocumentConversationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConversationRepository for DocumentConversationRepository {
    async fn touch(&self, a: &str, b: &str, at: DateTime<Utc>) -> Result<Conversation> {
        let conversation = Conversation::new(a, b, at);
        let data = to_document(&ConversationDTO::from(&conversation))
            .map_err(access_error("encode", Self::ENTITY_NAME))?;
        self.store
            .upsert(Self::COLLECTION, &conversation.conversation_id, data)
            .await
            .map_err(access_error("update", Self::ENTITY_NAME))?;
        Ok(conversation)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let query = Query::new().filter(Filter::Or(vec![
            Filter::equal("participant_a", user_id),
            Filter::equal("participant_b", user_id),
        ]));
        let summaries = list_all::<ConversationDTO>(
            self.document_store().as_ref(),
            Self::COLLECTION,
            &query,
            "conversations",
        )
        .await?;
        let mut conversations: Vec<Conversation> = summaries
            .into_iter()
            .map(Conversation::from)
            .filter(|conversation| conversation.includes(user_id))
            .collect();
        conversations.sort_by(|x, y| y.last_message_timestamp.cmp(&x.last_message_timestamp));
        Ok(conversations)
    }
}
