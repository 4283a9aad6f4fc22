//! Swipe matching domain module.

mod model;
mod repository;

pub use model::{Match, MatchStatus};
pub use repository::MatchRepository;
