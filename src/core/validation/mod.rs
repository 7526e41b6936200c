//! Validation and filtering system
//!
//! Form fields are filtered (e.g. trimmed) and then checked by a chain of
//! validators per field. Failures are collected into [`FieldErrors`] instead
//! of stopping at the first bad field, so a form can re-render every message
//! at once.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::FormSchema;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name → human-readable messages, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages reported for a field, empty if the field passed
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failing fields, in schema order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.add("customerId", "Please select a customer");
        errors.add("status", "Please select an invoice status.");

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["customerId", "status"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_field_errors_serialize_as_object_of_lists() {
        let mut errors = FieldErrors::new();
        errors.add("amount", "Please enter an amount greater than $0.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "amount": ["Please enter an amount greater than $0."] })
        );
    }

    #[test]
    fn test_get_missing_field_is_empty() {
        let errors = FieldErrors::new();
        assert!(errors.get("amount").is_empty());
        assert!(!errors.contains("amount"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_display_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.add("amount", "too small");
        errors.add("status", "missing");
        let display = errors.to_string();
        assert!(display.contains("amount: too small"));
        assert!(display.contains("status: missing"));
    }
}
