//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, an [`InvoiceStore`] backed by a
//! PostgreSQL database via `sqlx::PgPool`. Every value is bound as a
//! statement parameter; nothing is spliced into SQL text.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-actions = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! `invoices(id UUID, customer_id UUID → customers.id, amount BIGINT cents,
//! status VARCHAR, date DATE)`. Customer ids arrive as text and are cast to
//! UUID by the statement, so a malformed id is a store failure.

use crate::core::InvoiceStore;
use crate::core::invoice::{InvoiceChanges, InvoiceRecord, InvoiceStatus, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

type InvoiceRow = (Uuid, String, i64, String, NaiveDate);

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create customers table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES customers(id),
            amount BIGINT NOT NULL CHECK (amount >= 0),
            status VARCHAR(255) NOT NULL,
            date DATE NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create invoices table: {}", e))?;

    Ok(())
}

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let pool = PgPool::connect("postgres://localhost/invoicing").await?;
/// ensure_schema(&pool).await?;
/// let store = PostgresInvoiceStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Create a new `PostgresInvoiceStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn record_from_row((id, customer_id, amount_cents, status, date): InvoiceRow) -> Result<InvoiceRecord> {
        let status = status
            .parse::<InvoiceStatus>()
            .map_err(|e| anyhow!("Corrupt invoice {}: {}", id, e))?;
        Ok(InvoiceRecord {
            id,
            customer_id,
            amount_cents,
            status,
            date,
        })
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO invoices (customer_id, amount, status, date) \
             VALUES ($1::uuid, $2, $3, $4) RETURNING id",
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert invoice: {}", e))?;

        Ok(invoice.into_record(id))
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE invoices SET customer_id = $1::uuid, amount = $2, status = $3 WHERE id = $4",
        )
        .bind(&changes.customer_id)
        .bind(changes.amount_cents)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<InvoiceRecord>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, customer_id::text, amount, status, date FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to get invoice: {}", e))?;

        row.map(Self::record_from_row).transpose()
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<InvoiceRecord>> {
        let pattern = query.map(|q| format!("%{}%", escape_like(q)));

        let rows = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, customer_id::text, amount, status, date FROM invoices \
             WHERE $1::text IS NULL OR customer_id::text ILIKE $1 OR status ILIKE $1 \
             ORDER BY date DESC",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to list invoices: {}", e))?;

        rows.into_iter().map(Self::record_from_row).collect()
    }
}

/// Escape LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
