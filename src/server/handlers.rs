//! HTTP handlers for invoice forms and the invoice listing

use crate::actions::{ActionOutcome, ActionState, InvoiceActions};
use crate::core::error::{InvoicingError, RequestError};
use crate::core::{FormData, InvoiceRecord};
use crate::search::{QueryParams, SearchState};
use crate::server::cache::ListingCache;
use axum::{
    Form, Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub cache: Arc<ListingCache>,
}

/// Response for the listing endpoint
#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
    pub invoices: Vec<InvoiceRecord>,
    pub count: usize,
    #[serde(flatten)]
    pub search: SearchState,
}

fn parse_id(raw: &str) -> Result<Uuid, InvoicingError> {
    Uuid::parse_str(raw).map_err(|_| {
        RequestError::InvalidInvoiceId {
            id: raw.to_string(),
        }
        .into()
    })
}

/// Turn a pipeline outcome into a response
///
/// Redirects become `303 See Other`; failures re-render with the
/// `{errors?, message?}` state.
pub fn outcome_response(outcome: ActionOutcome) -> Response {
    if let Some(redirect) = outcome.redirect() {
        return Redirect::to(&redirect.location).into_response();
    }
    let status = match &outcome {
        ActionOutcome::Success { .. } => StatusCode::OK,
        ActionOutcome::ValidationFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ActionOutcome::StoreFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome.state())).into_response()
}

pub async fn list_invoices(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListInvoicesResponse>, InvoicingError> {
    let params = QueryParams::parse(raw.as_deref().unwrap_or_default()).map_err(|e| {
        RequestError::InvalidQuery {
            message: e.to_string(),
        }
    })?;
    let search = SearchState::from_params(&params);
    let path = state.actions.list_path();
    let term = search.term();

    let listing = match state.cache.get(path, term) {
        Some(listing) => listing,
        None => {
            let generation = state.cache.generation(path);
            let records = state.actions.store().list(term).await?;
            state.cache.put(path, term, generation, records)
        }
    };

    let invoices = listing.as_ref().clone();
    Ok(Json(ListInvoicesResponse {
        count: invoices.len(),
        invoices,
        search,
    }))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceRecord>, InvoicingError> {
    let id = parse_id(&id)?;
    state
        .actions
        .store()
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| RequestError::InvoiceNotFound { id }.into())
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let form = FormData::from(fields);
    outcome_response(state.actions.create(&ActionState::default(), &form).await)
}

/// Update an invoice
///
/// An invalid form propagates out of the pipeline as an error and is
/// answered here with `422`.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, InvoicingError> {
    let id = parse_id(&id)?;
    let form = FormData::from(fields);
    let outcome = state.actions.update(&id, &form).await?;
    Ok(outcome_response(outcome))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, InvoicingError> {
    let id = parse_id(&id)?;
    Ok(outcome_response(state.actions.delete(&id).await))
}
