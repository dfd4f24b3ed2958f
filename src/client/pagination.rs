//! Pagination helpers for Snyk REST responses
//!
//! Snyk REST endpoints paginate with cursors: each page carries a
//! `links.next` URL (usually host-relative, e.g. `/rest/groups/...?starting_after=...`)
//! until the last page.

use serde::Deserialize;

/// A single page of a JSON:API collection.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiPage<T> {
    /// The resources on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Navigation links
    #[serde(default)]
    pub links: Option<PageLinks>,
}

/// JSON:API navigation links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// Link to the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> JsonApiPage<T> {
    /// The raw `links.next` value, if present and non-empty.
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Resolve a `links.next` value against the API host.
///
/// Host-relative links are joined onto `api_host`; absolute links are used as-is.
pub fn resolve_next(api_host: &str, next: &str) -> String {
    if next.starts_with("http://") || next.starts_with("https://") {
        next.to_string()
    } else if next.starts_with('/') {
        format!("{}{}", api_host.trim_end_matches('/'), next)
    } else {
        format!("{}/{}", api_host.trim_end_matches('/'), next)
    }
}
