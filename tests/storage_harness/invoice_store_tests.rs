//! Macro-generated conformance suite for `InvoiceStore`
//!
//! `$factory` is awaited once per test and must yield a fresh, empty store.
//! `$customer_a` and `$customer_b` must be customer ids the store accepts.
//!
//! # Generated Tests
//!
//! - `test_insert_and_get`: insert returns the record, get finds it
//! - `test_get_nonexistent`: unknown id is `None`
//! - `test_update_existing`: mutable columns change, date does not
//! - `test_update_nonexistent`: zero rows, no error
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_list_newest_first`
//! - `test_list_filters_by_term`
//! - `test_list_term_is_literal`
//! - `test_concurrent_inserts`

#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr, $customer_a:expr, $customer_b:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use invoicing::core::{InvoiceStatus, InvoiceStore};
            use std::sync::Arc;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory.await;

                let created = store
                    .insert(new_invoice($customer_a, 1999, InvoiceStatus::Pending, day(3)))
                    .await
                    .unwrap();

                assert_eq!(created.customer_id, $customer_a);
                assert_eq!(created.amount_cents, 1999);
                assert_eq!(created.status, InvoiceStatus::Pending);
                assert_eq!(created.date, day(3));

                let fetched = store.get(&created.id).await.unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory.await;
                assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory.await;
                let created = store
                    .insert(new_invoice($customer_a, 500, InvoiceStatus::Pending, day(1)))
                    .await
                    .unwrap();

                let rows = store
                    .update(&created.id, changes($customer_b, 750, InvoiceStatus::Paid))
                    .await
                    .unwrap();
                assert_eq!(rows, 1);

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched.customer_id, $customer_b);
                assert_eq!(fetched.amount_cents, 750);
                assert_eq!(fetched.status, InvoiceStatus::Paid);
                assert_eq!(fetched.date, day(1));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory.await;
                let rows = store
                    .update(&Uuid::new_v4(), changes($customer_a, 1, InvoiceStatus::Paid))
                    .await
                    .unwrap();
                assert_eq!(rows, 0);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory.await;
                let created = store
                    .insert(new_invoice($customer_a, 100, InvoiceStatus::Paid, day(2)))
                    .await
                    .unwrap();

                assert_eq!(store.delete(&created.id).await.unwrap(), 1);
                assert!(store.get(&created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory.await;
                assert_eq!(store.delete(&Uuid::new_v4()).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory.await;
                for d in [4, 9, 1] {
                    store
                        .insert(new_invoice($customer_a, 100, InvoiceStatus::Pending, day(d)))
                        .await
                        .unwrap();
                }

                let dates: Vec<_> = store
                    .list(None)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|r| r.date)
                    .collect();
                assert_eq!(dates, vec![day(9), day(4), day(1)]);
            }

            #[tokio::test]
            async fn test_list_filters_by_term() {
                let store = $factory.await;
                store
                    .insert(new_invoice($customer_a, 100, InvoiceStatus::Pending, day(1)))
                    .await
                    .unwrap();
                store
                    .insert(new_invoice($customer_b, 200, InvoiceStatus::Paid, day(2)))
                    .await
                    .unwrap();

                let paid = store.list(Some("PAID")).await.unwrap();
                assert_eq!(paid.len(), 1);
                assert_eq!(paid[0].amount_cents, 200);

                let by_customer = store.list(Some($customer_a)).await.unwrap();
                assert_eq!(by_customer.len(), 1);
                assert_eq!(by_customer[0].customer_id, $customer_a);
            }

            #[tokio::test]
            async fn test_list_term_is_literal() {
                let store = $factory.await;
                store
                    .insert(new_invoice($customer_a, 100, InvoiceStatus::Pending, day(1)))
                    .await
                    .unwrap();

                assert!(store.list(Some("%")).await.unwrap().is_empty());
                assert!(store.list(Some("_")).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = Arc::new($factory.await);
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(new_invoice($customer_a, 100 + i, InvoiceStatus::Pending, day(1)))
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list(None).await.unwrap().len(), 10);
            }
        }
    };
}
