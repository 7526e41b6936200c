//! Declarative form schemas
//!
//! A [`FormSchema`] lists the fields it accepts, each with its filters and
//! validators, and turns an untrusted [`FormData`] into either the cleaned
//! values or the collected [`FieldErrors`].

use super::FieldErrors;
use crate::core::form::FormData;
use indexmap::IndexMap;

type Filter = Box<dyn Fn(&str, String) -> String + Send + Sync>;
type Validator = Box<dyn Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync>;

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Filters and validators for every field of a form
#[derive(Default)]
pub struct FormSchema {
    fields: IndexMap<&'static str, FieldRules>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter for a field, applied in registration order
    pub fn add_filter<F>(&mut self, field: &'static str, filter: F)
    where
        F: Fn(&str, String) -> String + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .filters
            .push(Box::new(filter));
    }

    /// Add a validator for a field
    ///
    /// Validators of a field run in registration order; the first failure is
    /// the one reported for that field.
    pub fn add_validator<F>(&mut self, field: &'static str, validator: F)
    where
        F: Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .validators
            .push(Box::new(validator));
    }

    /// Filter and validate a form
    ///
    /// Only declared fields are read; anything else in the form is ignored.
    /// Every field is checked, so the error map names all failing fields.
    pub fn validate_and_filter(
        &self,
        form: &FormData,
    ) -> Result<IndexMap<&'static str, String>, FieldErrors> {
        let mut cleaned = IndexMap::new();
        let mut errors = FieldErrors::new();

        for (&field, rules) in &self.fields {
            let value = form.get(field).map(|raw| {
                rules
                    .filters
                    .iter()
                    .fold(raw.to_string(), |acc, filter| filter(field, acc))
            });

            let failure = rules
                .validators
                .iter()
                .find_map(|validator| validator(field, value.as_deref()).err());

            match (failure, value) {
                (Some(message), _) => errors.add(field, message),
                (None, Some(value)) => {
                    cleaned.insert(field, value);
                }
                (None, None) => {}
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}
