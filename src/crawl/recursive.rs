// src/crawl/recursive.rs
// =============================================================================
// The recursive fan-out crawler.
//
// How one branch works (url, depth, tx):
// 1. depth == 0 -> stop
// 2. Claim the URL in the shared VisitedSet; if someone already has it, stop
// 3. Fetch it; on error, log it and stop (siblings keep going)
// 4. Send the URL on tx
// 5. Spawn one child branch per outbound link, each with its own channel
// 6. Drain the children one after another, in link order, forwarding
//    everything onto tx
// 7. Return - dropping tx closes our channel for the parent
//
// A branch whose reader hangs up stops at its next step: before fetching,
// on send, or while waiting on a child.
//
// The children all run at the same time, but their results reach the parent
// in link order: child i is drained completely before child i+1.
// =============================================================================

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use super::fetcher::{FetchError, Fetcher, Page};
use super::visited::VisitedSet;

// Everything the branches of one crawl share
pub(super) struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    visited: VisitedSet,
    // Caps how many fetches run at the same time
    limiter: Semaphore,
}

impl CrawlContext {
    pub(super) fn new(fetcher: Arc<dyn Fetcher>, visited: VisitedSet, concurrency: usize) -> Self {
        CrawlContext {
            fetcher,
            visited,
            limiter: Semaphore::new(concurrency.max(1)),
        }
    }

    // The permit covers the fetch only. Holding it while draining children
    // would let parents starve their own children of permits.
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        // acquire() only fails once the semaphore is closed, and we never close it
        let _permit = self.limiter.acquire().await.ok();
        self.fetcher.fetch(url).await
    }
}

// Crawls `url` and everything reachable from it within `depth` hops
//
// Returns a boxed future because the function spawns copies of itself:
// a plain `async fn` can't name its own (infinitely nested) future type.
pub(super) fn crawl_branch(
    ctx: Arc<CrawlContext>,
    url: String,
    depth: usize,
    tx: mpsc::Sender<String>,
) -> BoxFuture<'static, ()> {
    async move {
        // Out of depth, or nobody is listening any more
        if depth == 0 || tx.is_closed() {
            return;
        }

        if !ctx.visited.mark(&url).await {
            debug!(%url, "already visited");
            return;
        }

        let page = match ctx.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(%url, error = %e, "fetch failed");
                return;
            }
        };

        info!(%url, depth, body = %page.body, "found");
        if tx.send(url).await.is_err() {
            return;
        }

        // Fan out: every child starts right away
        let children: Vec<mpsc::Receiver<String>> = page
            .urls
            .into_iter()
            .map(|link| {
                let (child_tx, child_rx) = mpsc::channel(1);
                tokio::spawn(crawl_branch(ctx.clone(), link, depth - 1, child_tx));
                child_rx
            })
            .collect();

        // Fan in: relay each child's output in link order.
        // If our reader goes away, returning drops every child receiver,
        // and each child notices the same way one level down.
        for mut child in children {
            loop {
                let found = tokio::select! {
                    found = child.recv() => found,
                    _ = tx.closed() => return,
                };
                let Some(found) = found else {
                    break;
                };
                if tx.send(found).await.is_err() {
                    return;
                }
            }
        }
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does every child get its own channel?
//    - So the parent can drain them one at a time, in order
//    - With one shared channel, results would arrive in whatever order the
//      children happened to finish
//
// 2. Why Arc<CrawlContext>?
//    - Every spawned task must own what it uses ('static)
//    - Arc lets many tasks own the same context; clone() just bumps a counter
//
// 3. What is a Semaphore?
//    - A pool of N permits; acquire() waits until one is free
//    - The permit is returned automatically when `_permit` is dropped
//
// 4. What is tokio::select!?
//    - Waits on several futures and runs the branch of whichever finishes
//      first; the others are dropped
//    - tx.closed() finishes once the receiving side has been dropped
//
// 5. What happens when a fetch fails?
//    - We log it and return, which drops tx
//    - The parent sees our channel close and moves on to the next sibling
// -----------------------------------------------------------------------------
