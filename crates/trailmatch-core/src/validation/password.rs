//! Password rules and strength classification.

use strum_macros::{Display, EnumIter};
use strum::IntoEnumIterator;

use super::ValidationResult;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The five independent checks a password is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum PasswordCriterion {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordCriterion {
    pub fn is_met(self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= MIN_PASSWORD_LENGTH,
            Self::Uppercase => password.chars().any(|c| c.is_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_lowercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    pub fn message(self) -> String {
        match self {
            Self::MinLength => format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
            Self::Uppercase => "Password must contain an uppercase letter".to_string(),
            Self::Lowercase => "Password must contain a lowercase letter".to_string(),
            Self::Digit => "Password must contain a number".to_string(),
            Self::Special => "Password must contain a special character".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Criteria the password satisfies.
pub fn met_criteria(password: &str) -> Vec<PasswordCriterion> {
    PasswordCriterion::iter()
        .filter(|criterion| criterion.is_met(password))
        .collect()
}

/// All five met is strong; three or four is medium.
pub fn password_strength(password: &str) -> PasswordStrength {
    match met_criteria(password).len() {
        5 => PasswordStrength::Strong,
        3 | 4 => PasswordStrength::Medium,
        _ => PasswordStrength::Weak,
    }
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::error("Password is required");
    }
    ValidationResult {
        errors: PasswordCriterion::iter()
            .filter(|criterion| !criterion.is_met(password))
            .map(PasswordCriterion::message)
            .collect(),
    }
}
