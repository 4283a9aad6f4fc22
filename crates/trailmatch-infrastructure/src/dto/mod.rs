//! Document shapes for persistence.
//!
//! Domain models never reach the store directly: each collection has a DTO
//! whose serialized form is exactly what the document database holds.
//! DTOs are private to the infrastructure layer.
//!
//! ## Stored layout
//! - Optional fields are written as explicit `null`, never omitted.
//! - `userprofile.skill_summary` is a JSON-encoded string, not an object.
//! - Enumerations are stored in lowercase.
//! - Timestamps that the store sorts on are fixed-width RFC 3339 (see
//!   [`timestamp`]), so string order is chronological order.

mod conversation;
mod credential;
mod matching;
mod message;
mod profile;
pub mod timestamp;
mod user;

pub use conversation::ConversationDTO;
pub use credential::CredentialDTO;
pub use matching::MatchDTO;
pub use message::MessageDTO;
pub use profile::UserProfileDTO;
pub use user::UserDTO;
