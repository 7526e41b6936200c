//! Tagged results of the mutation pipeline

use crate::core::navigation::Redirect;
use crate::core::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// What a form re-renders with: per-field errors and/or a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a create, update or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The store accepted the write and the listing was invalidated
    Success {
        redirect: Option<Redirect>,
        message: Option<&'static str>,
    },
    /// The form failed the schema; the store was not called
    ValidationFailure {
        errors: FieldErrors,
        message: &'static str,
    },
    /// The store rejected the write; the cause is logged, not returned
    StoreFailure { message: &'static str },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success { .. })
    }

    /// Where to navigate next, if anywhere
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            ActionOutcome::Success { redirect, .. } => redirect.as_ref(),
            _ => None,
        }
    }

    /// The `{errors?, message?}` record for the caller
    pub fn state(&self) -> ActionState {
        match self {
            ActionOutcome::Success { message, .. } => ActionState {
                errors: None,
                message: message.map(str::to_string),
            },
            ActionOutcome::ValidationFailure { errors, message } => ActionState {
                errors: Some(errors.clone()),
                message: Some(message.to_string()),
            },
            ActionOutcome::StoreFailure { message } => ActionState {
                errors: None,
                message: Some(message.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serializes_only_present_keys() {
        let state = ActionOutcome::StoreFailure {
            message: "Database Error : Failed to delete invoice",
        }
        .state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Database Error : Failed to delete invoice" })
        );
    }

    #[test]
    fn test_validation_failure_state_carries_errors() {
        let mut errors = FieldErrors::new();
        errors.add("status", "Please select an invoice status.");
        let outcome = ActionOutcome::ValidationFailure {
            errors,
            message: "Missing Fields. Failed to Create Invoice",
        };

        let json = serde_json::to_value(outcome.state()).unwrap();
        assert_eq!(json["errors"]["status"][0], "Please select an invoice status.");
        assert_eq!(json["message"], "Missing Fields. Failed to Create Invoice");
        assert!(!outcome.is_success());
        assert!(outcome.redirect().is_none());
    }

    #[test]
    fn test_redirect_success_has_empty_state() {
        let outcome = ActionOutcome::Success {
            redirect: Some(Redirect::to("/dashboard/invoices")),
            message: None,
        };
        assert_eq!(outcome.state(), ActionState::default());
        assert_eq!(outcome.redirect().unwrap().location, "/dashboard/invoices");
    }
}
