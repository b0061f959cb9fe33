// src/crawl/queue.rs
// =============================================================================
// The frontier crawler: the same crawl, written as a breadth-first queue
// instead of recursive tasks.
//
// How it works:
// 1. Start with the initial URL as the only entry of level 0
// 2. Claim every URL of the current level in the VisitedSet
// 3. Fetch the claimed URLs, at most `concurrency` at a time
// 4. Send each URL as soon as its fetch succeeds (completion order)
// 5. The links of all fetched pages become the next level
// 6. Stop after `depth` levels or when a level comes up empty
//
// The number of in-flight fetches never exceeds `concurrency`, no matter how
// many links a page has. The price is ordering: URLs come out as fetches
// finish, not in link order.
// =============================================================================

use std::sync::Arc;

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::fetcher::Fetcher;
use super::visited::VisitedSet;

pub(super) async fn crawl_frontier(
    fetcher: Arc<dyn Fetcher>,
    visited: VisitedSet,
    start: String,
    depth: usize,
    concurrency: usize,
    tx: mpsc::Sender<String>,
) {
    let mut frontier = vec![start];

    for level in 0..depth {
        if frontier.is_empty() || tx.is_closed() {
            break;
        }

        // Duplicates inside one level are caught here too
        let mut claimed = Vec::with_capacity(frontier.len());
        for url in frontier.drain(..) {
            if visited.mark(&url).await {
                claimed.push(url);
            } else {
                debug!(%url, "already visited");
            }
        }
        debug!(level, pages = claimed.len(), "fetching level");

        let mut fetches = stream::iter(claimed)
            .map(|url| {
                let fetcher = fetcher.clone();
                async move {
                    let result = fetcher.fetch(&url).await;
                    (url, result)
                }
            })
            .buffer_unordered(concurrency.max(1));

        let mut next = Vec::new();
        while let Some((url, result)) = fetches.next().await {
            match result {
                Ok(page) => {
                    info!(%url, level, body = %page.body, "found");
                    if tx.send(url).await.is_err() {
                        return;
                    }
                    next.extend(page.urls);
                }
                Err(e) => {
                    warn!(%url, error = %e, "fetch failed");
                }
            }
        }

        frontier = next;
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - Runs up to N futures from a stream concurrently
//    - Yields results as they complete (not in original order)
//
// 2. Why `let fetcher = fetcher.clone()` inside map?
//    - Each future is `async move`, so it needs its own Arc handle
//
// 3. Breadth-first vs the recursive crawler:
//    - Here a URL is always claimed at its shortest distance from the start
//    - The recursive crawler claims it on whichever path gets there first
// -----------------------------------------------------------------------------
