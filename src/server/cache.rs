//! Cached listing views
//!
//! The listing handler reads through [`ListingCache`]; the mutation pipeline
//! invalidates it through [`CacheNavigator`]. Each path carries a generation
//! so a load that started before an invalidation cannot store its stale
//! result afterwards.
//!
//! Search terms come from the client, so each path keeps at most
//! `max_queries` listings; storing one more evicts the oldest.

use crate::core::InvoiceRecord;
use crate::core::navigation::CacheNavigator;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Listings kept per path unless configured otherwise
pub const DEFAULT_MAX_QUERIES: usize = 64;

type Listing = Arc<Vec<InvoiceRecord>>;

#[derive(Default)]
struct PathEntry {
    generation: u64,
    /// Insertion order, oldest first
    listings: IndexMap<Option<String>, Listing>,
}

/// Listing results keyed by (path, search term)
pub struct ListingCache {
    paths: RwLock<HashMap<String, PathEntry>>,
    max_queries: usize,
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingCache {
    pub fn new() -> Self {
        Self::with_max_queries(DEFAULT_MAX_QUERIES)
    }

    /// Keep at most `max_queries` listings per path (at least one)
    pub fn with_max_queries(max_queries: usize) -> Self {
        Self {
            paths: RwLock::default(),
            max_queries: max_queries.max(1),
        }
    }

    pub fn max_queries(&self) -> usize {
        self.max_queries
    }

    pub fn get(&self, path: &str, query: Option<&str>) -> Option<Listing> {
        let paths = self.paths.read().unwrap_or_else(PoisonError::into_inner);
        paths
            .get(path)?
            .listings
            .get(&query.map(str::to_string))
            .cloned()
    }

    /// Current generation of `path`; pass it back to [`put`](Self::put)
    pub fn generation(&self, path: &str) -> u64 {
        let paths = self.paths.read().unwrap_or_else(PoisonError::into_inner);
        paths.get(path).map_or(0, |entry| entry.generation)
    }

    /// Store a listing loaded at `generation`
    ///
    /// Dropped if the path was invalidated since; the records are returned
    /// either way.
    pub fn put(
        &self,
        path: &str,
        query: Option<&str>,
        generation: u64,
        records: Vec<InvoiceRecord>,
    ) -> Listing {
        let listing = Arc::new(records);
        let mut paths = self.paths.write().unwrap_or_else(PoisonError::into_inner);
        let entry = paths.entry(path.to_string()).or_default();
        if entry.generation != generation {
            return listing;
        }

        let key = query.map(str::to_string);
        if !entry.listings.contains_key(&key) && entry.listings.len() >= self.max_queries {
            entry.listings.shift_remove_index(0);
        }
        entry.listings.insert(key, listing.clone());
        listing
    }

    /// Listings cached under `path`
    pub fn len_for(&self, path: &str) -> usize {
        let paths = self.paths.read().unwrap_or_else(PoisonError::into_inner);
        paths.get(path).map_or(0, |entry| entry.listings.len())
    }

    pub fn len(&self) -> usize {
        self.paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|entry| entry.listings.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheNavigator for ListingCache {
    fn invalidate(&self, path: &str) {
        let mut paths = self.paths.write().unwrap_or_else(PoisonError::into_inner);
        let entry = paths.entry(path.to_string()).or_default();
        entry.generation += 1;
        let dropped = entry.listings.len();
        entry.listings.clear();
        tracing::debug!(path, dropped, "Listing invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/dashboard/invoices";

    #[test]
    fn test_put_then_get() {
        let cache = ListingCache::new();
        let generation = cache.generation(PATH);
        cache.put(PATH, Some("amy"), generation, Vec::new());

        assert!(cache.get(PATH, Some("amy")).is_some());
        assert!(cache.get(PATH, None).is_none());
    }

    #[test]
    fn test_invalidate_drops_every_query_for_path() {
        let cache = ListingCache::new();
        cache.put(PATH, None, 0, Vec::new());
        cache.put(PATH, Some("amy"), 0, Vec::new());
        cache.put("/dashboard/customers", None, 0, Vec::new());

        cache.invalidate(PATH);

        assert!(cache.get(PATH, None).is_none());
        assert!(cache.get(PATH, Some("amy")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_load_is_not_cached() {
        let cache = ListingCache::new();
        let generation = cache.generation(PATH);

        cache.invalidate(PATH);
        cache.put(PATH, None, generation, Vec::new());

        assert!(cache.is_empty());
    }

    #[test]
    fn test_distinct_terms_are_capped_per_path() {
        let cache = ListingCache::with_max_queries(16);
        let generation = cache.generation(PATH);

        for i in 0..10_000 {
            cache.put(PATH, Some(&format!("term-{}", i)), generation, Vec::new());
        }

        assert_eq!(cache.len_for(PATH), 16);
        assert_eq!(cache.len(), 16);
        assert!(cache.get(PATH, Some("term-9999")).is_some());
        assert!(cache.get(PATH, Some("term-0")).is_none());
    }

    #[test]
    fn test_oldest_term_is_evicted_first() {
        let cache = ListingCache::with_max_queries(2);
        cache.put(PATH, None, 0, Vec::new());
        cache.put(PATH, Some("amy"), 0, Vec::new());
        // Re-storing a cached term does not evict
        cache.put(PATH, Some("amy"), 0, Vec::new());
        assert_eq!(cache.len_for(PATH), 2);

        cache.put(PATH, Some("lee"), 0, Vec::new());

        assert!(cache.get(PATH, None).is_none());
        assert!(cache.get(PATH, Some("amy")).is_some());
        assert!(cache.get(PATH, Some("lee")).is_some());
    }

    #[test]
    fn test_cap_applies_per_path() {
        let cache = ListingCache::with_max_queries(1);
        cache.put(PATH, None, 0, Vec::new());
        cache.put("/dashboard/customers", None, 0, Vec::new());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.max_queries(), 1);
    }

    #[test]
    fn test_zero_cap_keeps_one() {
        assert_eq!(ListingCache::with_max_queries(0).max_queries(), 1);
    }
}
