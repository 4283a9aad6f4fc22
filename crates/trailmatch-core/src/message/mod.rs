//! Messaging domain module.
//!
//! - `model`: Message and Conversation entities
//! - `repository`: Persistence contracts for both

mod model;
mod repository;

pub use model::{Conversation, Message};
pub use repository::{ConversationRepository, MessageRepository};
