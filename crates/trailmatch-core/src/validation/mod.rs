//! Declarative field rules.
//!
//! Each schema turns a raw field value into a [`ValidationResult`]. Failures
//! are data, not errors: they are shown inline next to the field.

pub mod birthdate;
pub mod email;
pub mod message;
pub mod name;
pub mod password;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use password::{PasswordCriterion, PasswordStrength, password_strength};

/// Outcome of validating one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error, which is what a field shows inline.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

type CustomCheck = Arc<dyn Fn(&str, &HashMap<String, String>) -> ValidationResult + Send + Sync>;

/// A validation rule bound to a form field.
///
/// Rules receive the field value plus every other value in the form, so
/// cross-field checks such as password confirmation can be expressed.
#[derive(Clone)]
pub enum Rule {
    Password,
    Email,
    Name,
    Message,
    Birthdate,
    /// Must equal the value of the named field.
    Matches(String),
    /// Must be non-empty after trimming.
    Required,
    /// Accepts anything.
    Optional,
    Custom(CustomCheck),
}

impl Rule {
    pub fn custom(
        check: impl Fn(&str, &HashMap<String, String>) -> ValidationResult + Send + Sync + 'static,
    ) -> Self {
        Rule::Custom(Arc::new(check))
    }

    pub fn check(&self, value: &str, values: &HashMap<String, String>) -> ValidationResult {
        match self {
            Rule::Password => password::validate_password(value),
            Rule::Email => email::validate_email(value),
            Rule::Name => name::validate_name(value),
            Rule::Message => message::validate_message(value),
            Rule::Birthdate => birthdate::validate_birthdate(value, chrono::Local::now().date_naive()),
            Rule::Matches(other) => {
                let expected = values.get(other).map(String::as_str).unwrap_or_default();
                if value == expected {
                    ValidationResult::ok()
                } else {
                    ValidationResult::error("Passwords do not match")
                }
            }
            Rule::Required => {
                if value.trim().is_empty() {
                    ValidationResult::error("This field is required")
                } else {
                    ValidationResult::ok()
                }
            }
            Rule::Optional => ValidationResult::ok(),
            Rule::Custom(check) => check(value, values),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Password => write!(f, "Password"),
            Rule::Email => write!(f, "Email"),
            Rule::Name => write!(f, "Name"),
            Rule::Message => write!(f, "Message"),
            Rule::Birthdate => write!(f, "Birthdate"),
            Rule::Matches(other) => f.debug_tuple("Matches").field(other).finish(),
            Rule::Required => write!(f, "Required"),
            Rule::Optional => write!(f, "Optional"),
            Rule::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_rule_compares_other_field() {
        let mut values = HashMap::new();
        values.insert("password".to_string(), "Password1@".to_string());

        let rule = Rule::Matches("password".to_string());
        assert!(rule.check("Password1@", &values).is_valid());
        assert_eq!(
            rule.check("Password1!", &values).first_error(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_custom_rule() {
        let rule = Rule::custom(|value, _| {
            if value.starts_with("https://") {
                ValidationResult::ok()
            } else {
                ValidationResult::error("Must be a secure link")
            }
        });
        let values = HashMap::new();
        assert!(rule.check("https://instagram.com/ann", &values).is_valid());
        assert!(!rule.check("http://instagram.com/ann", &values).is_valid());
    }
}
