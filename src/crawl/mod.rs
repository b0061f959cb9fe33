// src/crawl/mod.rs
// =============================================================================
// This module handles the concurrent web crawl.
//
// Features:
// - Depth-limited crawling from a starting URL
// - One shared VisitedSet per crawl, so no page is fetched or reported twice
// - Two strategies:
//   * recursive: one task per discovered link, results relayed in link order
//   * frontier: breadth-first levels with a fixed number of fetches in flight
// - A fetch error only ends its own branch
//
// Submodules:
// - fetcher: The Fetcher trait, Page and FetchError
// - fake: An in-memory Fetcher with canned pages
// - visited: The shared "already claimed" URL set
// - recursive / queue: The two crawl strategies
// =============================================================================

mod fake;
mod fetcher;
mod queue;
mod recursive;
mod visited;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::info;

pub use fake::FakeFetcher;
pub use fetcher::Fetcher;

use queue::crawl_frontier;
use recursive::{crawl_branch, CrawlContext};
use visited::VisitedSet;

// How many found URLs may queue up before the crawl waits for the reader
const OUTPUT_CAPACITY: usize = 16;

/// Which crawl algorithm to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One task per link, results relayed in link order
    #[default]
    Recursive,
    /// Breadth-first levels, results in completion order
    Frontier,
}

// Settings for a single crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many hops from the start URL to explore (0 = nothing at all)
    pub depth: usize,
    /// Maximum number of fetches in flight at once
    pub concurrency: usize,
    pub strategy: Strategy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            depth: 4,
            concurrency: 8,
            strategy: Strategy::Recursive,
        }
    }
}

// Starts a crawl in the background and hands back its output channel
//
// Each successfully fetched URL arrives exactly once. The channel closes when
// the crawl is done, so `while let Some(url) = rx.recv().await` drains it all.
pub fn spawn_crawl(
    start: impl Into<String>,
    fetcher: Arc<dyn Fetcher>,
    config: CrawlConfig,
) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(OUTPUT_CAPACITY);
    let start = start.into();
    let visited = VisitedSet::new();

    info!(%start, depth = config.depth, strategy = ?config.strategy, "starting crawl");

    tokio::spawn(async move {
        match config.strategy {
            Strategy::Recursive => {
                let ctx = Arc::new(CrawlContext::new(
                    fetcher,
                    visited.clone(),
                    config.concurrency,
                ));
                crawl_branch(ctx, start, config.depth, tx).await;
            }
            Strategy::Frontier => {
                crawl_frontier(
                    fetcher,
                    visited.clone(),
                    start,
                    config.depth,
                    config.concurrency,
                    tx,
                )
                .await;
            }
        }
        let claimed = visited.len().await;
        info!(claimed, "crawl finished");
    });

    rx
}

// Runs a crawl to completion and returns every URL it found, in output order
pub async fn crawl(
    start: impl Into<String>,
    fetcher: Arc<dyn Fetcher>,
    config: CrawlConfig,
) -> Vec<String> {
    let mut rx = spawn_crawl(start, fetcher, config);
    let mut found = Vec::new();
    while let Some(url) = rx.recv().await {
        found.push(url);
    }
    found
}
