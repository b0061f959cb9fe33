// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Dispatch to the appropriate exercise
// 4. Exit with proper code (0 = success, 1 = trees differ, 2 = error)
// =============================================================================

mod cli;   // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the concurrent crawler
mod tree;  // src/tree/ - the tree equivalence exercise

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use cli::{Cli, Commands};
use crawl::{CrawlConfig, FakeFetcher, Fetcher, Strategy};
use tree::Tree;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("Invalid --log-level '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Trees { left, right, json } => handle_trees(left, right, json).await,
        Commands::Crawl {
            url,
            depth,
            concurrency,
            strategy,
            fixture,
            latency_ms,
            json,
        } => {
            let config = CrawlConfig {
                depth,
                concurrency: usize::from(concurrency),
                strategy,
            };
            handle_crawl(&url, config, fixture.as_deref(), latency_ms, json).await
        }
    }
}

#[derive(Debug, Serialize)]
struct TreeReport {
    left: i64,
    right: i64,
    same: bool,
}

// Handles the 'trees' subcommand
//
// Returns Ok(0) when the trees are equivalent and Ok(1) when they are not
async fn handle_trees(left: i64, right: i64, json: bool) -> Result<i32> {
    // The rng is dropped before the first .await
    let (left_tree, right_tree) = {
        let mut rng = rand::thread_rng();
        (
            Arc::new(Tree::random(left, &mut rng)),
            Arc::new(Tree::random(right, &mut rng)),
        )
    };

    let same = tree::same(left_tree.clone(), right_tree.clone()).await;

    if json {
        let report = TreeReport { left, right, same };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("🌳 Left tree  (k={}): {:?}", left, tree::values(&left_tree).await);
        println!("🌳 Right tree (k={}): {:?}", right, tree::values(&right_tree).await);
        println!("{}", same);
    }

    Ok(if same { 0 } else { 1 })
}

#[derive(Debug, Serialize)]
struct CrawlReport {
    start: String,
    depth: usize,
    strategy: Strategy,
    found: Vec<String>,
}

// Handles the 'crawl' subcommand
//
// Found URLs are printed as they arrive; fetch errors show up in the log
async fn handle_crawl(
    start: &str,
    config: CrawlConfig,
    fixture: Option<&Path>,
    latency_ms: u64,
    json: bool,
) -> Result<i32> {
    Url::parse(start).with_context(|| format!("Invalid URL '{}'", start))?;

    let mut fake = match fixture {
        Some(path) => FakeFetcher::from_path(path)?,
        None => FakeFetcher::golang(),
    };
    if latency_ms > 0 {
        fake = fake.with_latency(0..=latency_ms);
    }
    let fetcher: Arc<dyn Fetcher> = Arc::new(fake);

    if json {
        let report = CrawlReport {
            start: start.to_string(),
            depth: config.depth,
            strategy: config.strategy,
            found: crawl::crawl(start, fetcher, config).await,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    println!("🔍 Crawling: {}", start);
    println!("📊 Max crawl depth: {} ({:?})", config.depth, config.strategy);

    let mut found = crawl::spawn_crawl(start, fetcher, config);
    let mut count = 0;
    while let Some(url) = found.recv().await {
        println!("{}", url);
        count += 1;
    }

    info!(count, "crawl complete");
    println!("📄 Found {} page(s)", count);
    Ok(0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<dyn Fetcher>?
//    - `dyn Fetcher` means "some type implementing Fetcher, decided at runtime"
//    - Arc lets every crawl task share that one fetcher
//
// 2. Why do logs go to stderr?
//    - stdout is the result (URLs, JSON) and may be piped somewhere
//    - Diagnostics shouldn't get mixed into it
//
// 3. What is {:#} in eprintln!?
//    - anyhow's "alternate" format: the error plus all of its context
// -----------------------------------------------------------------------------
