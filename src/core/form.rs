//! Loosely-typed submitted form data

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key → string collection from a submitted form
///
/// Nothing about the values is trusted; a schema decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(IndexMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for FormData {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_field_is_none() {
        let form = FormData::from_pairs([("amount", "12")]);
        assert_eq!(form.get("amount"), Some("12"));
        assert_eq!(form.get("status"), None);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut form = FormData::new();
        form.insert("status", "pending");
        form.insert("status", "paid");
        assert_eq!(form.get("status"), Some("paid"));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("customerId".to_string(), "c-1".to_string());
        let form = FormData::from(map);
        assert_eq!(form.get("customerId"), Some("c-1"));
    }
}
