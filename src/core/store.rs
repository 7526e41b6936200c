//! Store trait for invoice persistence
//!
//! The relational store is the sole owner of durable invoice state. Each
//! method maps to one parameterized statement; nothing is cached between
//! calls.

use crate::core::invoice::{InvoiceChanges, InvoiceRecord, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for invoice records
///
/// Implementations report any failure as an error; the mutation pipeline
/// decides how much of it a user gets to see.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice; the store generates the id
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord>;

    /// Overwrite customer, amount and status of an invoice
    ///
    /// Returns the number of rows affected. An unknown id affects no rows
    /// and is not an error.
    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64>;

    /// Delete an invoice, returning the number of rows affected
    async fn delete(&self, id: &Uuid) -> Result<u64>;

    /// Get an invoice by ID
    async fn get(&self, id: &Uuid) -> Result<Option<InvoiceRecord>>;

    /// List invoices, newest first, optionally filtered by a search term
    async fn list(&self, query: Option<&str>) -> Result<Vec<InvoiceRecord>>;
}
