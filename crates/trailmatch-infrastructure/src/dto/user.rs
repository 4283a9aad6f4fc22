//! User DTO

use serde::{Deserialize, Serialize};

use trailmatch_core::user::User;

/// Stored form of a `user` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDTO {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserDTO {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<UserDTO> for User {
    fn from(dto: UserDTO) -> Self {
        User::new(dto.user_id, dto.name, dto.email)
    }
}
