//! Debounced synchronization of the search box with the URL
//!
//! The synchronizer never fetches data. It rewrites `page` and `query` in the
//! current location once typing settles; whatever renders the listing reacts
//! to the URL change.

use super::debounce::{DebounceState, Debouncer};
use super::params::{PAGE_PARAM, QUERY_PARAM, QueryParams};
use crate::config::SearchConfig;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Default quiet period before the URL is rewritten
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Access to the current location
pub trait Navigator: Send + Sync {
    fn current_query_params(&self) -> QueryParams;

    fn current_path(&self) -> String;

    /// Replace the visible location without adding a history entry
    fn replace_location(&self, path_with_query: &str);
}

/// Location for a settled search term
///
/// The page always resets to 1; an empty term removes `query`.
pub fn search_location(path: &str, mut params: QueryParams, term: &str) -> String {
    params.set(PAGE_PARAM, "1");
    if term.is_empty() {
        params.delete(QUERY_PARAM);
    } else {
        params.set(QUERY_PARAM, term);
    }
    format!("{}?{}", path, params.to_query_string())
}

/// Search input controller
pub struct SearchSynchronizer {
    navigator: Arc<dyn Navigator>,
    debouncer: Debouncer<String>,
}

impl SearchSynchronizer {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self::with_quiet_period(navigator, DEFAULT_QUIET_PERIOD)
    }

    /// Controller using the configured quiet period
    pub fn from_config(navigator: Arc<dyn Navigator>, config: &SearchConfig) -> Self {
        Self::with_quiet_period(navigator, config.quiet_period())
    }

    pub fn with_quiet_period(navigator: Arc<dyn Navigator>, quiet_period: Duration) -> Self {
        let target = navigator.clone();
        let debouncer = Debouncer::new(quiet_period, move |term: String| {
            let location = search_location(
                &target.current_path(),
                target.current_query_params(),
                &term,
            );
            tracing::debug!(%location, "Search location replaced");
            target.replace_location(&location);
        });
        Self {
            navigator,
            debouncer,
        }
    }

    /// Value the input shows on first render, seeded from the URL
    pub fn initial_value(&self) -> Option<String> {
        self.navigator
            .current_query_params()
            .get(QUERY_PARAM)
            .map(str::to_string)
    }

    /// Handle a change event carrying the full input text
    pub fn on_input(&self, term: impl Into<String>) {
        self.debouncer.call(term.into());
    }

    /// Drop a pending update
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn state(&self) -> DebounceState {
        self.debouncer.state()
    }
}

/// In-memory location with a log of every replacement
#[derive(Debug)]
pub struct MemoryNavigator {
    inner: Mutex<MemoryLocation>,
}

#[derive(Debug)]
struct MemoryLocation {
    path: String,
    params: QueryParams,
    replaced: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(path: impl Into<String>, params: QueryParams) -> Self {
        Self {
            inner: Mutex::new(MemoryLocation {
                path: path.into(),
                params,
                replaced: Vec::new(),
            }),
        }
    }

    /// Start at `path_with_query`, e.g. `/dashboard/invoices?query=foo`
    pub fn at(path_with_query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let (path, query) = split_location(path_with_query);
        Ok(Self::new(path, QueryParams::parse(query)?))
    }

    /// Every location passed to `replace_location`, oldest first
    pub fn replaced(&self) -> Vec<String> {
        self.lock().replaced.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryLocation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for MemoryNavigator {
    fn current_query_params(&self) -> QueryParams {
        self.lock().params.clone()
    }

    fn current_path(&self) -> String {
        self.lock().path.clone()
    }

    fn replace_location(&self, path_with_query: &str) {
        let (path, query) = split_location(path_with_query);
        let mut location = self.lock();
        match QueryParams::parse(query) {
            Ok(params) => location.params = params,
            Err(e) => tracing::warn!(error = %e, "Unparseable query in replaced location"),
        }
        location.path = path.to_string();
        location.replaced.push(path_with_query.to_string());
    }
}

fn split_location(path_with_query: &str) -> (&str, &str) {
    path_with_query
        .split_once('?')
        .unwrap_or((path_with_query, ""))
}
