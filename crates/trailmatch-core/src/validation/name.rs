//! Display name rule.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationResult;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L} '\-]*$").expect("valid name regex"));

pub fn validate_name(name: &str) -> ValidationResult {
    let name = name.trim();
    let length = name.chars().count();

    if name.is_empty() {
        ValidationResult::error("Name is required")
    } else if length < MIN_NAME_LENGTH {
        ValidationResult::error(format!(
            "Name must be at least {} characters",
            MIN_NAME_LENGTH
        ))
    } else if length > MAX_NAME_LENGTH {
        ValidationResult::error(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        ))
    } else if !NAME_PATTERN.is_match(name) {
        ValidationResult::error("Name can only contain letters, spaces, apostrophes and hyphens")
    } else {
        ValidationResult::ok()
    }
}
