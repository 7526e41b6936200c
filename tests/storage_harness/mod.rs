//! Shared test harness for `InvoiceStore` backends
//!
//! Backends pick up the whole contract suite with one macro call:
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new(), "cust-1", "cust-2");
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod invoice_store_tests;

use chrono::NaiveDate;
use invoicing::core::{InvoiceChanges, InvoiceStatus, NewInvoice};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

pub fn new_invoice(customer: &str, cents: i64, status: InvoiceStatus, date: NaiveDate) -> NewInvoice {
    NewInvoice {
        customer_id: customer.to_string(),
        amount_cents: cents,
        status,
        date,
    }
}

pub fn changes(customer: &str, cents: i64, status: InvoiceStatus) -> InvoiceChanges {
    InvoiceChanges {
        customer_id: customer.to_string(),
        amount_cents: cents,
        status,
    }
}
