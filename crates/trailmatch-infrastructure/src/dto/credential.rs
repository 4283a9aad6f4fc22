//! Credential DTO

use serde::{Deserialize, Serialize};

use trailmatch_core::user::Credential;

/// Stored form of a `credentials` document, keyed by `user_id` and looked
/// up by normalized email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialDTO {
    pub email: String,
    pub password_hash: String,
    pub user_id: String,
}

impl From<&Credential> for CredentialDTO {
    fn from(credential: &Credential) -> Self {
        Self {
            email: credential.email.clone(),
            password_hash: credential.password_hash.clone(),
            user_id: credential.user_id.clone(),
        }
    }
}

impl From<CredentialDTO> for Credential {
    fn from(dto: CredentialDTO) -> Self {
        Credential {
            email: dto.email,
            password_hash: dto.password_hash,
            user_id: dto.user_id,
        }
    }
}
