//! In-memory implementation of InvoiceStore for testing and development

use crate::core::InvoiceStore;
use crate::core::invoice::{InvoiceChanges, InvoiceRecord, NewInvoice};
use anyhow::{Result, bail};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory invoice store
///
/// When constructed with [`with_customers`](Self::with_customers), writes
/// naming an unknown customer fail the way a foreign-key violation would.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<IndexMap<Uuid, InvoiceRecord>>>,
    customers: Option<Arc<HashSet<String>>>,
}

impl InMemoryInvoiceStore {
    /// Create a new in-memory invoice store accepting any customer id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that only accepts the given customer ids
    pub fn with_customers<I, S>(customers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            invoices: Arc::default(),
            customers: Some(Arc::new(customers.into_iter().map(Into::into).collect())),
        }
    }

    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }

    fn check_customer(&self, customer_id: &str) -> Result<()> {
        let Some(customers) = &self.customers else {
            return Ok(());
        };
        if !customers.contains(customer_id) {
            bail!(
                "insert or update on table \"invoices\" violates foreign key constraint: customer '{}' does not exist",
                customer_id
            );
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord> {
        self.check_customer(&invoice.customer_id)?;

        let record = invoice.into_record(Uuid::new_v4());
        self.invoices
            .write()
            .await
            .insert(record.id, record.clone());

        Ok(record)
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        self.check_customer(&changes.customer_id)?;

        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(id) {
            Some(record) => {
                record.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        let removed = self.invoices.write().await.shift_remove(id);
        Ok(u64::from(removed.is_some()))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<InvoiceRecord>> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<InvoiceRecord>> {
        let invoices = self.invoices.read().await;

        let mut records: Vec<InvoiceRecord> = invoices
            .values()
            .filter(|record| query.is_none_or(|q| record.matches(q)))
            .cloned()
            .collect();
        // Newest first; insertion order breaks ties, latest first
        records.reverse();
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InvoiceStatus;
    use chrono::NaiveDate;

    fn new_invoice(customer: &str, cents: i64, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: customer.to_string(),
            amount_cents: cents,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    fn changes(customer: &str) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: customer.to_string(),
            amount_cents: 500,
            status: InvoiceStatus::Paid,
        }
    }

    #[tokio::test]
    async fn test_insert_generates_id() {
        let store = InMemoryInvoiceStore::new();
        let a = store.insert(new_invoice("c1", 100, 1)).await.unwrap();
        let b = store.insert(new_invoice("c1", 100, 1)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_date() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 3)).await.unwrap();

        let rows = store.update(&created.id, changes("c2")).await.unwrap();
        assert_eq!(rows, 1);

        let updated = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.customer_id, "c2");
        assert_eq!(updated.amount_cents, 500);
        assert_eq!(updated.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_nothing() {
        let store = InMemoryInvoiceStore::new();
        let rows = store.update(&Uuid::new_v4(), changes("c1")).await.unwrap();
        assert_eq!(rows, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let store = InMemoryInvoiceStore::new();
        let created = store.insert(new_invoice("c1", 100, 1)).await.unwrap();

        assert_eq!(store.delete(&created.id).await.unwrap(), 1);
        assert_eq!(store.delete(&created.id).await.unwrap(), 0);
        assert!(store.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_customer_is_rejected() {
        let store = InMemoryInvoiceStore::with_customers(["c1"]);
        assert!(store.insert(new_invoice("c1", 100, 1)).await.is_ok());

        let err = store.insert(new_invoice("ghost", 100, 1)).await.unwrap_err();
        assert!(err.to_string().contains("foreign key"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_filtered() {
        let store = InMemoryInvoiceStore::new();
        store.insert(new_invoice("amy", 1, 1)).await.unwrap();
        store.insert(new_invoice("bob", 2, 9)).await.unwrap();
        store.insert(new_invoice("amy", 3, 5)).await.unwrap();

        let all = store.list(None).await.unwrap();
        let cents: Vec<i64> = all.iter().map(|r| r.amount_cents).collect();
        assert_eq!(cents, vec![2, 3, 1]);

        let amy = store.list(Some("AMY")).await.unwrap();
        assert_eq!(amy.len(), 2);
        assert!(amy.iter().all(|r| r.customer_id == "amy"));
    }
}
