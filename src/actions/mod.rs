//! Validated mutation pipeline for invoices
//!
//! Every operation runs validate → normalize → persist → invalidate →
//! redirect. Validation and store failures come back as [`ActionOutcome`]
//! values; the one exception is [`InvoiceActions::update`], whose validation
//! failure is returned as an `Err` for the enclosing boundary to handle.
//!
//! ```rust,ignore
//! let actions = InvoiceActions::new(store, navigator);
//! match actions.create(&ActionState::default(), &form).await {
//!     ActionOutcome::Success { redirect: Some(to), .. } => navigate(to),
//!     failure => rerender(failure.state()),
//! }
//! ```

mod outcome;

pub use outcome::{ActionOutcome, ActionState};

use crate::core::error::ValidationError;
use crate::core::form::FormData;
use crate::core::invoice::InvoiceInput;
use crate::core::navigation::CacheNavigator;
use crate::core::store::InvoiceStore;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default listing view, invalidated and navigated to after writes
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub const CREATE_VALIDATION_FAILED: &str = "Missing Fields. Failed to Create Invoice";
pub const CREATE_STORE_FAILED: &str = "Database Error : Failed to create Invoice";
pub const UPDATE_STORE_FAILED: &str = "Database Error : Failed to update invoice";
pub const DELETE_SUCCEEDED: &str = "Deleted invoice";
pub const DELETE_STORE_FAILED: &str = "Database Error : Failed to delete invoice";

type Today = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Create, update and delete operations over an explicit store and navigator
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    navigator: Arc<dyn CacheNavigator>,
    list_path: String,
    today: Today,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, navigator: Arc<dyn CacheNavigator>) -> Self {
        Self {
            store,
            navigator,
            list_path: INVOICES_PATH.to_string(),
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Use another listing path for invalidation and redirects
    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = path.into();
        self
    }

    /// Replace the source of creation dates (UTC today by default)
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Create an invoice from a submitted form
    ///
    /// `_previous` is the state the form was last rendered with; it does not
    /// influence the result.
    pub async fn create(&self, _previous: &ActionState, form: &FormData) -> ActionOutcome {
        let input = match InvoiceInput::safe_parse(form) {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(fields = %errors, "Invoice form rejected");
                return ActionOutcome::ValidationFailure {
                    errors,
                    message: CREATE_VALIDATION_FAILED,
                };
            }
        };

        let invoice = input.into_new_invoice((self.today)());
        match self.store.insert(invoice).await {
            Ok(record) => {
                tracing::info!(invoice_id = %record.id, amount_cents = record.amount_cents, "Invoice created");
                self.navigator.invalidate(&self.list_path);
                ActionOutcome::Success {
                    redirect: Some(self.navigator.redirect(&self.list_path)),
                    message: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create invoice");
                ActionOutcome::StoreFailure {
                    message: CREATE_STORE_FAILED,
                }
            }
        }
    }

    /// Update customer, amount and status of an invoice
    ///
    /// Unlike [`create`](Self::create), an invalid form is not turned into an
    /// outcome: it is returned as `Err` and must be handled by the caller.
    pub async fn update(
        &self,
        id: &Uuid,
        form: &FormData,
    ) -> Result<ActionOutcome, ValidationError> {
        let changes = InvoiceInput::parse(form)?.into_changes();

        match self.store.update(id, changes).await {
            Ok(rows) => {
                if rows == 0 {
                    tracing::debug!(invoice_id = %id, "Update matched no invoice");
                }
                tracing::info!(invoice_id = %id, "Invoice updated");
                self.navigator.invalidate(&self.list_path);
                Ok(ActionOutcome::Success {
                    redirect: Some(self.navigator.redirect(&self.list_path)),
                    message: None,
                })
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to update invoice");
                Ok(ActionOutcome::StoreFailure {
                    message: UPDATE_STORE_FAILED,
                })
            }
        }
    }

    /// Delete an invoice
    ///
    /// No redirect: this is invoked from the listing itself.
    pub async fn delete(&self, id: &Uuid) -> ActionOutcome {
        match self.store.delete(id).await {
            Ok(_) => {
                tracing::info!(invoice_id = %id, "Invoice deleted");
                self.navigator.invalidate(&self.list_path);
                ActionOutcome::Success {
                    redirect: None,
                    message: Some(DELETE_SUCCEEDED),
                }
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to delete invoice");
                ActionOutcome::StoreFailure {
                    message: DELETE_STORE_FAILED,
                }
            }
        }
    }
}
