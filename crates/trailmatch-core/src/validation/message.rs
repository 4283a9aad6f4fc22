//! Chat message rule.

use super::ValidationResult;

pub const MAX_MESSAGE_LENGTH: usize = 1000;

pub fn validate_message(content: &str) -> ValidationResult {
    let content = content.trim();
    if content.is_empty() {
        ValidationResult::error("Message cannot be empty")
    } else if content.chars().count() > MAX_MESSAGE_LENGTH {
        ValidationResult::error(format!(
            "Message must be at most {} characters",
            MAX_MESSAGE_LENGTH
        ))
    } else {
        ValidationResult::ok()
    }
}
