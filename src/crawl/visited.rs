// src/crawl/visited.rs
// =============================================================================
// The set of URLs one crawl has already claimed.
//
// Every crawl worker shares the same VisitedSet. The only way in is mark(),
// which checks and inserts under a single lock acquisition. Splitting that
// into "is it seen?" followed by "mark it seen" would let two workers both
// see "no" and both fetch the same page.
//
// Rust concepts:
// - Arc<Mutex<T>>: Shared ownership + exclusive access across tasks
// - HashSet::insert returns whether the value was new
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        VisitedSet::default()
    }

    // Claims `url` for the caller.
    // Returns true exactly once per URL; every later call returns false.
    pub async fn mark(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().await;
        !urls.contains(url) && urls.insert(url.to_string())
    }

    pub async fn len(&self) -> usize {
        self.urls.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mark_once() {
        let visited = VisitedSet::new();
        assert!(visited.mark("http://golang.org/").await);
        assert!(!visited.mark("http://golang.org/").await);
        assert!(visited.mark("http://golang.org/pkg/").await);
        assert_eq!(visited.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mark_has_one_winner() {
        let visited = VisitedSet::new();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let visited = visited.clone();
                tokio::spawn(async move { visited.mark("http://golang.org/").await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
