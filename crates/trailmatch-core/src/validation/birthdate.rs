//! Birthdate rule and age derivation.

use chrono::{Datelike, NaiveDate};

use super::ValidationResult;

pub const MINIMUM_AGE: u32 = 18;

/// Whole years between `birthdate` and `today`.
///
/// Returns `None` when `birthdate` lies after `today`, so a derived age is
/// never negative.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birthdate > today {
        return None;
    }
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

pub fn parse_birthdate(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}

pub fn validate_birthdate(value: &str, today: NaiveDate) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::error("Birthdate is required");
    }
    let Ok(birthdate) = parse_birthdate(value) else {
        return ValidationResult::error("Birthdate must be a valid date (YYYY-MM-DD)");
    };
    match age_on(birthdate, today) {
        None => ValidationResult::error("Birthdate cannot be in the future"),
        Some(age) if age < MINIMUM_AGE => {
            ValidationResult::error(format!("You must be at least {} years old", MINIMUM_AGE))
        }
        Some(_) => ValidationResult::ok(),
    }
}
