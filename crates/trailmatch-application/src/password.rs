//! Password hashing.

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use trailmatch_core::TrailmatchError;

/// Hashes a password into a PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, TrailmatchError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TrailmatchError::internal(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored PHC string.
///
/// An unparseable stored hash is an error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, TrailmatchError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| TrailmatchError::internal(format!("Invalid stored password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Password1@").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Password1@", &hash).unwrap());
        assert!(!verify_password("password1@", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(
            hash_password("Password1@").unwrap(),
            hash_password("Password1@").unwrap()
        );
    }

    #[test]
    fn test_garbage_hash_is_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }
}
