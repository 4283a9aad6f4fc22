//! Domain layer for Trailmatch.
//!
//! Entities, repository contracts, validation rules, form composition and
//! the modal state machine. Nothing in this crate talks to the network.

pub mod error;
pub mod form;
pub mod lookup;
pub mod matching;
pub mod message;
pub mod modal;
pub mod profile;
pub mod repository;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::TrailmatchError;
pub use lookup::Lookup;
