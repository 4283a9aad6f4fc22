//! Email address rule.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationResult;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

pub fn validate_email(email: &str) -> ValidationResult {
    if email.trim().is_empty() {
        ValidationResult::error("Email is required")
    } else if !is_valid_email(email) {
        ValidationResult::error("Invalid email address")
    } else {
        ValidationResult::ok()
    }
}

/// Lowercased, trimmed form used as a lookup key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(validate_email("ann@x.com").is_valid());
        assert!(validate_email("  first.last+tag@mail.example.org ").is_valid());
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!(validate_email("").first_error(), Some("Email is required"));
        assert!(!validate_email("ann@").is_valid());
        assert!(!validate_email("ann x@y.com").is_valid());
        assert!(!validate_email("ann@localhost").is_valid());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Ann@X.com "), "ann@x.com");
    }
}
