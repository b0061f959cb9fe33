// src/crawl/fake.rs
// =============================================================================
// A Fetcher that serves canned pages from memory.
//
// There is no real network here on purpose: the exercise is about how the
// crawler coordinates its workers, not about HTTP. Pages come from either:
// - the built-in golang.org map (four pages, one dangling link), or
// - a JSON fixture file: { "<url>": { "body": "...", "urls": ["..."] } }
//
// An optional random latency per fetch makes tasks finish out of order,
// which is handy for seeing that dedup holds under any scheduling.
// =============================================================================

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use rand::Rng;

use super::fetcher::{FetchError, Fetcher, Page};

#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Page>,
    latency_ms: Option<RangeInclusive<u64>>,
}

impl FakeFetcher {
    pub fn new(pages: HashMap<String, Page>) -> Self {
        FakeFetcher {
            pages,
            latency_ms: None,
        }
    }

    /// The four-page golang.org site. `http://golang.org/cmd/` is linked
    /// from two pages but is not in the map, so fetching it fails.
    pub fn golang() -> Self {
        let pages = [
            (
                "http://golang.org/",
                "The Go Programming Language",
                &["http://golang.org/pkg/", "http://golang.org/cmd/"][..],
            ),
            (
                "http://golang.org/pkg/",
                "Packages",
                &[
                    "http://golang.org/",
                    "http://golang.org/cmd/",
                    "http://golang.org/pkg/fmt/",
                    "http://golang.org/pkg/os/",
                ][..],
            ),
            (
                "http://golang.org/pkg/fmt/",
                "Package fmt",
                &["http://golang.org/", "http://golang.org/pkg/"][..],
            ),
            (
                "http://golang.org/pkg/os/",
                "Package os",
                &["http://golang.org/", "http://golang.org/pkg/"][..],
            ),
        ];

        FakeFetcher::new(
            pages
                .into_iter()
                .map(|(url, body, urls)| {
                    let page = Page {
                        body: body.to_string(),
                        urls: urls.iter().map(|u| u.to_string()).collect(),
                    };
                    (url.to_string(), page)
                })
                .collect(),
        )
    }

    // Parses a fixture like {"http://a/": {"body": "A", "urls": ["http://b/"]}}
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: HashMap<String, Page> =
            serde_json::from_str(json).context("Invalid fixture JSON")?;
        Ok(FakeFetcher::new(pages))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        FakeFetcher::from_json(&json)
            .with_context(|| format!("Failed to load fixture {}", path.display()))
    }

    /// Every fetch sleeps for a random number of milliseconds in `range`
    pub fn with_latency(mut self, range: RangeInclusive<u64>) -> Self {
        self.latency_ms = Some(range);
        self
    }

    // Picked before the async block: ThreadRng must not live across an .await
    fn pick_delay(&self) -> Option<Duration> {
        let range = self.latency_ms.clone()?;
        if range.is_empty() {
            return None;
        }
        Some(Duration::from_millis(rand::thread_rng().gen_range(range)))
    }
}

impl Fetcher for FakeFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Page, FetchError>> {
        let delay = self.pick_delay();
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    url: url.to_string(),
                })
        }
        .boxed()
    }
}
