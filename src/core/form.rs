use crate::domain::model::{InputField, UserInput};
use crate::utils::validation::{validate_detail_field, FieldError};
use std::collections::BTreeMap;

/// Values and per-field errors of the business-idea form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: UserInput,
    errors: BTreeMap<InputField, FieldError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: UserInput) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn values(&self) -> &UserInput {
        &self.values
    }

    pub fn error(&self, field: InputField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &BTreeMap<InputField, FieldError> {
        &self.errors
    }

    /// Editing a field clears its error until the next blur or submit.
    pub fn set_field(&mut self, field: InputField, value: impl Into<String>) {
        self.values.set(field, value);
        self.errors.remove(&field);
    }

    pub fn blur(&mut self, field: InputField) -> Option<FieldError> {
        let result = validate_detail_field(self.values.get(field));
        match result {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
        result
    }

    /// Authoritative submit gate: revalidates every field and replaces the
    /// error map wholesale.
    pub fn validate_all(&mut self) -> bool {
        self.errors = InputField::ALL
            .into_iter()
            .filter_map(|field| validate_detail_field(self.values.get(field)).map(|e| (field, e)))
            .collect();
        self.errors.is_empty()
    }

    /// UX hint for disabling the submit action. Not a correctness gate.
    pub fn is_any_field_empty(&self) -> bool {
        InputField::ALL
            .into_iter()
            .any(|field| self.values.get(field).trim().is_empty())
    }
}
