//! Query-string state for the search page

use serde::{Deserialize, Serialize};

/// Parameter carrying the search term
pub const QUERY_PARAM: &str = "query";
/// Parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Ordered query-string parameters with URLSearchParams semantics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`
    pub fn parse(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)?;
        Ok(Self { pairs })
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`
    ///
    /// The first existing entry keeps its position; later duplicates are
    /// removed. A new name is appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(key, _)| {
                    let keep = key != name || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    /// Remove every entry for `name`
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(key, _)| key != name);
    }

    /// Encode as `application/x-www-form-urlencoded`, without a leading `?`
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

/// Search state mirrored in the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: None,
            page: first_page(),
        }
    }
}

impl SearchState {
    /// Read the state from query parameters; a bad or zero page means page 1
    pub fn from_params(params: &QueryParams) -> Self {
        let page = params
            .get(PAGE_PARAM)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or_else(first_page);
        Self {
            query: params
                .get(QUERY_PARAM)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            page,
        }
    }

    /// The term to filter by, if any
    pub fn term(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}
