//! Validation errors collected while an editor applies submitted values.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

/// Field name → message catalog keys. An empty state is valid.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field_is_valid(&self, field: &str) -> bool {
        !self.errors.contains_key(field)
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Copies `validator` errors, preferring the declared message over the code.
    pub fn merge_validation(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add_error(field.to_string(), message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn merges_validator_messages_and_codes() {
        let sample = Sample {
            name: String::new(),
            email: "nope".to_string(),
        };
        let errors = sample.validate().expect_err("sample is invalid");

        let mut state = ModelState::new();
        state.merge_validation(&errors);

        assert!(!state.is_valid());
        assert_eq!(state.errors()["name"], vec!["required".to_string()]);
        assert_eq!(state.errors()["email"], vec!["email".to_string()]);
        assert!(state.field_is_valid("other"));
    }
}
