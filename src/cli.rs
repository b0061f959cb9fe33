// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per exercise:
// - trees: compare two randomly shaped trees
// - crawl: crawl the fake web from a starting URL
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::crawl::Strategy;
use crate::tree::Tree;

// 10k must fit in an i64, so k is bounded on both sides
fn k_parser() -> clap::builder::RangedI64ValueParser<i64> {
    clap::value_parser!(i64).range(Tree::MIN_K..=Tree::MAX_K)
}

#[derive(Parser, Debug)]
#[command(
    name = "channel-tour",
    version = "0.1.0",
    about = "Concurrency exercises: tree equivalence and a fan-out web crawler",
    long_about = "channel-tour runs two small concurrency exercises. `trees` walks two binary trees \
                  in parallel and reports whether they hold the same values. `crawl` explores a \
                  fake web concurrently, reporting each page exactly once."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter, e.g. "info" or "channel_tour=debug"
    ///
    /// Logs go to stderr; stdout only carries results
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether two random trees hold the same values
    ///
    /// Example: channel-tour trees --left 1 --right 2
    Trees {
        /// The left tree holds left, 2*left, ..., 10*left
        #[arg(long, default_value_t = 1, value_parser = k_parser())]
        left: i64,

        /// The right tree holds right, 2*right, ..., 10*right
        #[arg(long, default_value_t = 1, value_parser = k_parser())]
        right: i64,

        /// Output the result in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Crawl the fake web starting from a URL
    ///
    /// Example: channel-tour crawl http://golang.org/ --depth 4
    Crawl {
        /// URL to start from
        #[arg(default_value = "http://golang.org/")]
        url: String,

        /// Maximum crawl depth (0 = fetch nothing, 1 = just the start page)
        #[arg(long, default_value_t = 4)]
        depth: usize,

        /// Maximum number of fetches in flight at once
        #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        /// Crawl algorithm
        #[arg(long, value_enum, default_value_t = Strategy::Recursive)]
        strategy: Strategy,

        /// JSON file with the pages to serve instead of the golang.org set
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Add a random 0..=N millisecond delay to every fetch
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,

        /// Output the result in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["channel-tour", "crawl"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Crawl {
                url,
                depth,
                concurrency,
                strategy,
                fixture,
                latency_ms,
                json,
            } => {
                assert_eq!(url, "http://golang.org/");
                assert_eq!(depth, 4);
                assert_eq!(concurrency, 8);
                assert_eq!(strategy, Strategy::Recursive);
                assert!(fixture.is_none());
                assert_eq!(latency_ms, 0);
                assert!(!json);
            }
            other => panic!("expected crawl, got {:?}", other),
        }
    }

    #[test]
    fn test_crawl_flags() {
        let cli = Cli::try_parse_from([
            "channel-tour",
            "crawl",
            "http://root/",
            "--strategy",
            "frontier",
            "--depth",
            "2",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Crawl { url, depth, strategy, .. } => {
                assert_eq!(url, "http://root/");
                assert_eq!(depth, 2);
                assert_eq!(strategy, Strategy::Frontier);
            }
            other => panic!("expected crawl, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Cli::try_parse_from(["channel-tour", "crawl", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn test_trees_k_out_of_range_rejected() {
        // 10 * 10^18 would overflow an i64
        let err = Cli::try_parse_from(["channel-tour", "trees", "--left", "1000000000000000000"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from(["channel-tour", "trees", "--right", "1000000000000000000"])
            .is_err());
    }

    #[test]
    fn test_trees_k_at_bound_accepted() {
        let max = Tree::MAX_K.to_string();
        let cli = Cli::try_parse_from(["channel-tour", "trees", "--left", max.as_str()]).unwrap();
        match cli.command {
            Commands::Trees { left, .. } => assert_eq!(left, Tree::MAX_K),
            other => panic!("expected trees, got {:?}", other),
        }
    }

    #[test]
    fn test_trees_args() {
        let cli = Cli::try_parse_from(["channel-tour", "trees", "--right", "2", "--json"]).unwrap();
        match cli.command {
            Commands::Trees { left, right, json } => {
                assert_eq!((left, right, json), (1, 2, true));
            }
            other => panic!("expected trees, got {:?}", other),
        }
    }
}
