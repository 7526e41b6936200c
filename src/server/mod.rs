//! HTTP surface for the invoice slice
//!
//! [`ServerBuilder`] wires a store, the mutation pipeline and the
//! [`ListingCache`] into an axum router:
//! - form posts for create, edit and delete
//! - a cached, searchable listing

pub mod builder;
pub mod cache;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use cache::ListingCache;
pub use handlers::{AppState, ListInvoicesResponse, outcome_response};
pub use router::build_invoice_routes;
