//! Form composition over validation rules.
//!
//! A [`Form`] binds a [`FormSchema`] to a set of field values and hands each
//! field component its value, its visible error and its change/blur entry
//! points. Errors appear progressively: a field shows an error only after
//! it has been blurred once, or after a submit attempt.

use std::collections::HashMap;

use crate::error::{Result, TrailmatchError};
use crate::validation::{Rule, ValidationResult};

/// Ordered field rules.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<(String, Rule)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Checks a complete set of values at once, as a submit would.
    ///
    /// Errors come back in field order, first error per field. A missing
    /// value is checked as the empty string.
    pub fn validate(&self, values: &HashMap<String, String>) -> Result<()> {
        let errors: Vec<String> = self
            .fields
            .iter()
            .filter_map(|(name, rule)| {
                let value = values.get(name).map(String::as_str).unwrap_or_default();
                rule.check(value, values).first_error().map(str::to_string)
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TrailmatchError::Validation(errors))
        }
    }

    fn rule(&self, name: &str) -> Option<&Rule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    /// Signup: name, email, password, confirmation and birthdate.
    pub fn signup() -> Self {
        Self::new()
            .field("name", Rule::Name)
            .field("email", Rule::Email)
            .field("password", Rule::Password)
            .field("confirm_password", Rule::Matches("password".to_string()))
            .field("birthdate", Rule::Birthdate)
    }

    /// Login only checks presence and email shape; strength is a signup concern.
    pub fn login() -> Self {
        Self::new()
            .field("email", Rule::Email)
            .field("password", Rule::Required)
    }

    pub fn message() -> Self {
        Self::new().field("content", Rule::Message)
    }

    pub fn profile_edit() -> Self {
        Self::new()
            .field("name", Rule::Name)
            .field("bio", Rule::Optional)
            .field("birthdate", Rule::Birthdate)
    }
}

/// What a field component renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub name: String,
    pub value: String,
    /// Only set once the field has been touched.
    pub error: Option<String>,
    pub touched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// The schema passed and the callback ran.
    Submitted(T),
    /// The callback was not invoked; field name to first error.
    Rejected(HashMap<String, String>),
}

/// Mutable state of one form instance.
#[derive(Debug, Clone)]
pub struct Form {
    schema: FormSchema,
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    touched: HashMap<String, bool>,
}

impl Form {
    pub fn new(schema: FormSchema) -> Self {
        Self::with_defaults(schema, HashMap::new())
    }

    /// Pre-populates values. Defaults never mark a field touched or errored.
    pub fn with_defaults(schema: FormSchema, defaults: HashMap<String, String>) -> Self {
        let values = schema
            .names()
            .map(|name| {
                let value = defaults.get(name).cloned().unwrap_or_default();
                (name.to_string(), value)
            })
            .collect();
        Self {
            schema,
            values,
            errors: HashMap::new(),
            touched: HashMap::new(),
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn field(&self, name: &str) -> FieldBinding {
        let touched = self.is_touched(name);
        FieldBinding {
            name: name.to_string(),
            value: self.value(name).to_string(),
            error: if touched {
                self.errors.get(name).cloned()
            } else {
                None
            },
            touched,
        }
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// Updates a value. A touched field is re-validated so a fixed error
    /// clears while typing.
    pub fn on_change(&mut self, name: &str, value: impl Into<String>) {
        if self.schema.rule(name).is_none() {
            tracing::warn!("on_change for unknown form field '{}'", name);
            return;
        }
        self.values.insert(name.to_string(), value.into());
        if self.is_touched(name) {
            self.validate_field(name);
        }
        // A dependent field (password confirmation) must follow its source.
        let dependents: Vec<String> = self
            .schema
            .fields
            .iter()
            .filter(|(_, rule)| matches!(rule, Rule::Matches(source) if source == name))
            .map(|(field, _)| field.clone())
            .collect();
        for dependent in dependents {
            if self.is_touched(&dependent) {
                self.validate_field(&dependent);
            }
        }
    }

    pub fn on_blur(&mut self, name: &str) {
        if self.schema.rule(name).is_none() {
            return;
        }
        self.touched.insert(name.to_string(), true);
        self.validate_field(name);
    }

    /// Whole-schema check, independent of touched state.
    pub fn is_valid(&self) -> bool {
        self.schema
            .fields
            .iter()
            .all(|(name, rule)| rule.check(self.value(name), &self.values).is_valid())
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_valid()
    }

    /// Touches every field, validates the whole schema and invokes
    /// `on_submit` only if it passes.
    pub fn submit<T>(
        &mut self,
        on_submit: impl FnOnce(&HashMap<String, String>) -> T,
    ) -> SubmitOutcome<T> {
        let names: Vec<String> = self.schema.names().map(str::to_string).collect();
        for name in &names {
            self.touched.insert(name.clone(), true);
            self.validate_field(name);
        }
        if self.errors.is_empty() {
            SubmitOutcome::Submitted(on_submit(&self.values))
        } else {
            SubmitOutcome::Rejected(self.errors.clone())
        }
    }

    fn validate_field(&mut self, name: &str) -> ValidationResult {
        let result = match self.schema.rule(name) {
            Some(rule) => rule.check(self.value(name), &self.values),
            None => ValidationResult::ok(),
        };
        match result.first_error() {
            Some(error) => {
                self.errors.insert(name.to_string(), error.to_string());
            }
            None => {
                self.errors.remove(name);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_form() -> Form {
        Form::new(FormSchema::login())
    }

    #[test]
    fn test_error_hidden_until_blur() {
        let mut form = login_form();
        form.on_change("email", "not-an-email");
        assert_eq!(form.field("email").error, None);

        form.on_blur("email");
        assert_eq!(
            form.field("email").error.as_deref(),
            Some("Invalid email address")
        );

        form.on_change("email", "ann@x.com");
        assert_eq!(form.field("email").error, None);
    }

    #[test]
    fn test_submit_disabled_until_schema_passes() {
        let mut form = login_form();
        assert!(!form.can_submit());

        form.on_change("email", "ann@x.com");
        assert!(!form.can_submit());

        form.on_change("password", "anything");
        assert!(form.can_submit());
    }

    #[test]
    fn test_submit_blocks_callback_on_invalid_schema() {
        let mut form = login_form();
        form.on_change("email", "ann@x.com");

        let mut called = false;
        let outcome = form.submit(|_| called = true);

        assert!(!called);
        match outcome {
            SubmitOutcome::Rejected(errors) => {
                assert_eq!(
                    errors.get("password").map(String::as_str),
                    Some("This field is required")
                );
            }
            SubmitOutcome::Submitted(_) => panic!("expected rejection"),
        }
        assert!(form.field("password").touched);
    }

    #[test]
    fn test_submit_passes_values_when_valid() {
        let mut form = login_form();
        form.on_change("email", "ann@x.com");
        form.on_change("password", "secret");

        let outcome = form.submit(|values| values["email"].clone());
        assert_eq!(outcome, SubmitOutcome::Submitted("ann@x.com".to_string()));
    }

    #[test]
    fn test_defaults_do_not_touch_fields() {
        let mut defaults = HashMap::new();
        defaults.insert("name".to_string(), "A".to_string());
        let form = Form::with_defaults(FormSchema::profile_edit(), defaults);

        let name = form.field("name");
        assert_eq!(name.value, "A");
        assert!(!name.touched);
        assert_eq!(name.error, None);
    }

    #[test]
    fn test_confirmation_follows_password_changes() {
        let mut form = Form::new(FormSchema::signup());
        form.on_change("password", "Password1@");
        form.on_change("confirm_password", "Password1@");
        form.on_blur("confirm_password");
        assert_eq!(form.field("confirm_password").error, None);

        form.on_change("password", "Password2@");
        assert_eq!(
            form.field("confirm_password").error.as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_schema_validate_reports_in_field_order() {
        let mut values = HashMap::new();
        values.insert("email".to_string(), "ann@".to_string());

        let err = FormSchema::login().validate(&values).unwrap_err();
        assert_eq!(
            err,
            TrailmatchError::Validation(vec![
                "Invalid email address".to_string(),
                "This field is required".to_string(),
            ])
        );

        values.insert("email".to_string(), "ann@x.com".to_string());
        values.insert("password".to_string(), "pw".to_string());
        assert!(FormSchema::login().validate(&values).is_ok());
    }
}
