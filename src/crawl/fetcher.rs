// src/crawl/fetcher.rs
// =============================================================================
// The Fetcher abstraction: "given a URL, give me the page and its links".
//
// The crawler only ever talks to this trait, so it never knows (or cares)
// whether pages come from the network or from a canned map in memory.
//
// Rust concepts:
// - Traits: Shared behaviour behind a common interface
// - BoxFuture: A heap-allocated future, so a trait method can be async
// - thiserror: Derive std::error::Error for our own error enum
// =============================================================================

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// A fetched page: its body and the links found on it, in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub body: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Everything that can go wrong while fetching a single URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The fetcher has no page for this URL
    #[error("not found: {url}")]
    NotFound { url: String },
}

/// Something that can fetch pages.
///
/// Implementations must be shareable across tasks (Send + Sync) because
/// every crawl worker holds a handle to the same fetcher.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Page, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = FetchError::NotFound {
            url: "http://golang.org/cmd/".to_string(),
        };
        assert_eq!(err.to_string(), "not found: http://golang.org/cmd/");
    }

    #[test]
    fn test_page_urls_default_to_empty() {
        let page: Page = serde_json::from_str(r#"{"body": "leaf"}"#).unwrap();
        assert_eq!(page.body, "leaf");
        assert!(page.urls.is_empty());
    }
}
