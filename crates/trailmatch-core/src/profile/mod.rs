//! Profile domain module.

mod model;
mod repository;

pub use model::{AdventurePreference, DatingPreference, SkillLevel, UserProfile};
pub use repository::ProfileRepository;
