//! Application layer for Trailmatch.
//!
//! Use cases that coordinate the repository traits from `trailmatch-core`.
//! Services hold `Arc<dyn Repository>` handles and never see a concrete
//! store.

pub mod account_service;
pub mod match_service;
pub mod messaging_service;
pub mod password;
pub mod profile_service;

pub use account_service::{AccountService, SignupRequest, UserUpdate};
pub use match_service::MatchService;
pub use messaging_service::MessagingService;
pub use profile_service::ProfileService;
