//! # Invoicing
//!
//! The invoice slice of a billing dashboard: validated create, update and
//! delete operations over an invoice store, and a debounced search box that
//! mirrors its value into the URL.
//!
//! ## Features
//!
//! - **Schema validation**: every form field is checked and every failure reported
//! - **Exact money**: amounts are decimal and stored as integer cents
//! - **Explicit collaborators**: the store and the cache navigator are injected
//! - **Typed outcomes**: failures are values the caller re-renders
//! - **Debounced search**: only the last keystroke of a burst touches the URL
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoicing::prelude::*;
//!
//! let store = Arc::new(InMemoryInvoiceStore::new());
//! let navigator = Arc::new(RecordingNavigator::new());
//! let actions = InvoiceActions::new(store, navigator);
//!
//! let form = FormData::from_pairs([
//!     ("customerId", "cust-1"),
//!     ("amount", "19.99"),
//!     ("status", "pending"),
//! ]);
//! let outcome = actions.create(&ActionState::default(), &form).await;
//! assert_eq!(outcome.redirect().unwrap().location, "/dashboard/invoices");
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CacheNavigator, FieldErrors, FormData, InvoiceChanges, InvoiceInput, InvoiceRecord,
        InvoiceStatus, InvoiceStore, InvoicingError, InvoicingResult, NewInvoice,
        RecordingNavigator, Redirect, ValidationError,
    };

    // === Actions ===
    pub use crate::actions::{ActionOutcome, ActionState, InvoiceActions};

    // === Search ===
    pub use crate::search::{
        DebounceState, Debouncer, MemoryNavigator, Navigator, QueryParams, SearchState,
        SearchSynchronizer,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{ListingCache, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
