//! Core module containing the invoice domain, validation and collaborator traits

pub mod error;
pub mod form;
pub mod invoice;
pub mod navigation;
pub mod store;
pub mod validation;

pub use error::{InvoicingError, InvoicingResult, ValidationError};
pub use form::FormData;
pub use invoice::{InvoiceChanges, InvoiceInput, InvoiceRecord, InvoiceStatus, NewInvoice};
pub use navigation::{CacheNavigator, RecordingNavigator, Redirect};
pub use store::InvoiceStore;
pub use validation::FieldErrors;
