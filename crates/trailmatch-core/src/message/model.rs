//! Message and Conversation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message between two users. Immutable once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub conversation_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True if this message travels between `a` and `b`, in either direction.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

/// The thread between exactly two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    /// Participant IDs in sorted order.
    pub participants: (String, String),
    pub last_message_timestamp: DateTime<Utc>,
}

impl Conversation {
    /// Stable ID for a participant pair, independent of argument order.
    pub fn id_for(a: &str, b: &str) -> String {
        let (first, second) = Self::ordered(a, b);
        format!("{}__{}", first, second)
    }

    pub fn new(a: &str, b: &str, last_message_timestamp: DateTime<Utc>) -> Self {
        let (first, second) = Self::ordered(a, b);
        Self {
            conversation_id: Self::id_for(a, b),
            participants: (first.to_string(), second.to_string()),
            last_message_timestamp,
        }
    }

    pub fn includes(&self, user_id: &str) -> bool {
        self.participants.0 == user_id || self.participants.1 == user_id
    }

    fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &str, receiver: &str) -> Message {
        Message {
            message_id: "m1".to_string(),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            content: "hi".to_string(),
            conversation_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_between_either_direction() {
        let msg = message("u1", "u2");
        assert!(msg.is_between("u1", "u2"));
        assert!(msg.is_between("u2", "u1"));
        assert!(!msg.is_between("u1", "u3"));
    }

    #[test]
    fn test_conversation_id_is_order_independent() {
        assert_eq!(Conversation::id_for("bob", "ann"), Conversation::id_for("ann", "bob"));
        let conversation = Conversation::new("bob", "ann", Utc::now());
        assert_eq!(conversation.participants.0, "ann");
        assert!(conversation.includes("bob"));
    }
}
