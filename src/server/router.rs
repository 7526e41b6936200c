//! Router builder for invoice routes

use crate::server::handlers::{
    AppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build invoice routes under the listing path
///
/// - GET  {list} - List invoices (`query`, `page`)
/// - POST {list}/create - Create from a form
/// - GET  {list}/{id} - Get one invoice
/// - POST {list}/{id}/edit - Update from a form
/// - POST {list}/{id}/delete - Delete
pub fn build_invoice_routes(state: AppState) -> Router {
    let list = state.actions.list_path().trim_end_matches('/').to_string();
    let index = if list.is_empty() { "/" } else { list.as_str() };

    Router::new()
        .route(index, get(list_invoices))
        .route(&format!("{}/create", list), post(create_invoice))
        .route(&format!("{}/{{id}}", list), get(get_invoice))
        .route(&format!("{}/{{id}}/edit", list), post(update_invoice))
        .route(&format!("{}/{{id}}/delete", list), post(delete_invoice))
        .with_state(state)
}
