//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User account and login credential models
//! - `repository`: Persistence contracts for users and credentials

mod model;
mod repository;

pub use model::{Credential, User};
pub use repository::{CredentialRepository, UserRepository};
