//! Typed error handling for the invoicing slice
//!
//! Validation and store failures inside the mutation pipeline are turned into
//! [`ActionOutcome`](crate::actions::ActionOutcome) values and never reach this
//! module. What remains here are the failures that do cross a boundary:
//!
//! - [`ValidationError`]: an unvalidated payload on the update path
//! - [`StorageError`]: store failures surfaced outside the pipeline (listing)
//! - [`ConfigError`]: configuration loading and validation
//! - [`RequestError`]: malformed HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.update(&id, &form).await {
//!     Ok(outcome) => render(outcome.state()),
//!     Err(ValidationError::FieldErrors(errors)) => rerender_with(errors),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type for the invoicing slice
#[derive(Debug, thiserror::Error)]
pub enum InvoicingError {
    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoicingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoicingError::Validation(e) => e.status_code(),
            InvoicingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicingError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoicingError::Validation(e) => e.error_code(),
            InvoicingError::Storage(_) => "STORAGE_ERROR",
            InvoicingError::Config(_) => "CONFIG_ERROR",
            InvoicingError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoicingError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "errors": errors }))
            }
            InvoicingError::Request(RequestError::InvalidInvoiceId { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InvoicingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// One or more form fields failed the schema
    #[error("Invalid invoice fields: {0}")]
    FieldErrors(FieldErrors),
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
        }
    }

    /// The per-field messages carried by this error
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            ValidationError::FieldErrors(errors) => errors,
        }
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        ValidationError::FieldErrors(errors)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config '{source_name}': {message}")]
    ParseError {
        source_name: String,
        message: String,
    },

    /// Configuration parsed but breaks a rule
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// IO error while reading configuration
    #[error("IO error reading '{path}': {message}")]
    IoError { path: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            source_name: "<inline>".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(err: validator::ValidationErrors) -> Self {
        ConfigError::Invalid {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Invoice id is not a UUID
    #[error("Invalid invoice ID format: '{id}'")]
    InvalidInvoiceId { id: String },

    /// Invalid query string
    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },

    /// No invoice with this id
    #[error("Invoice not found: {id}")]
    InvoiceNotFound { id: uuid::Uuid },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidInvoiceId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvoiceNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidInvoiceId { .. } => "INVALID_INVOICE_ID",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvoiceNotFound { .. } => "NOT_FOUND",
        }
    }
}

/// Convert from anyhow::Error at the store seam
impl From<anyhow::Error> for InvoicingError {
    fn from(err: anyhow::Error) -> Self {
        InvoicingError::Storage(StorageError::QueryError {
            backend: "store".to_string(),
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for invoicing operations
pub type InvoicingResult<T> = Result<T, InvoicingError>;
