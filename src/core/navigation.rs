//! Cache invalidation and navigation collaborator
//!
//! After a successful write the pipeline marks the listing view stale and,
//! for create/update, asks for a redirect. The redirect is returned as a
//! [`Redirect`] value so callers branch on it instead of losing control.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Instruction to navigate to another view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Invalidation and navigation hooks notified by the mutation pipeline
pub trait CacheNavigator: Send + Sync {
    /// Mark the view at `path` stale so the next read re-fetches it
    fn invalidate(&self, path: &str);

    /// Produce the navigation to `path`
    fn redirect(&self, path: &str) -> Redirect {
        Redirect::to(path)
    }
}

/// A navigator call, as seen by [`RecordingNavigator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCall {
    Invalidate(String),
    Redirect(String),
}

/// Navigator that only records what it was asked to do
///
/// Useful for testing and headless callers.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in the order it was made
    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn invalidated(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                NavigationCall::Invalidate(path) => Some(path),
                NavigationCall::Redirect(_) => None,
            })
            .collect()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                NavigationCall::Redirect(path) => Some(path),
                NavigationCall::Invalidate(_) => None,
            })
            .collect()
    }

    fn record(&self, call: NavigationCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl CacheNavigator for RecordingNavigator {
    fn invalidate(&self, path: &str) {
        self.record(NavigationCall::Invalidate(path.to_string()));
    }

    fn redirect(&self, path: &str) -> Redirect {
        self.record(NavigationCall::Redirect(path.to_string()));
        Redirect::to(path)
    }
}
