//! Reusable field filters
//!
//! These filters transform raw form values before validation

/// Filter: trim whitespace from the value
pub fn trim() -> impl Fn(&str, String) -> String + Send + Sync + Clone {
    |_: &str, value: String| value.trim().to_string()
}
