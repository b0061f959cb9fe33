// src/tree/compare.rs
// =============================================================================
// The Comparator: are two trees holding the same values in the same order?
//
// Strategy:
// - Spawn one walker task per tree, each with its own channel (capacity 1)
// - Pull one value from each channel in lockstep
// - Bail out with false on the first difference
//
// Note that tree *shape* does not matter, only the in-order sequence.
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;

use super::node::Tree;
use super::walk::walk;

// Returns true iff both trees produce identical in-order sequences
//
// When we return early, both receivers are dropped; the walkers notice on
// their next send and exit on their own.
pub async fn same(a: Arc<Tree>, b: Arc<Tree>) -> bool {
    let (tx_a, mut rx_a) = mpsc::channel(1);
    let (tx_b, mut rx_b) = mpsc::channel(1);

    tokio::spawn(async move { walk(&a, tx_a).await });
    tokio::spawn(async move { walk(&b, tx_b).await });

    loop {
        match (rx_a.recv().await, rx_b.recv().await) {
            (Some(x), Some(y)) if x == y => continue,
            // Both closed together: same length, no mismatch
            (None, None) => return true,
            // Different values, or one walk ended before the other
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tree(values: &[i64]) -> Arc<Tree> {
        Arc::new(Tree::from_values(values.iter().copied()))
    }

    #[tokio::test]
    async fn test_both_empty_are_same() {
        assert!(same(tree(&[]), tree(&[])).await);
    }

    #[tokio::test]
    async fn test_empty_vs_single_differs() {
        assert!(!same(tree(&[]), tree(&[1])).await);
        assert!(!same(tree(&[1]), tree(&[])).await);
    }

    #[tokio::test]
    async fn test_same_tree_is_same() {
        let t = tree(&[4, 2, 6, 1, 3, 5, 7]);
        assert!(same(t.clone(), t).await);
    }

    #[tokio::test]
    async fn test_different_shapes_same_values() {
        // A right-leaning chain vs a balanced tree
        assert!(same(tree(&[1, 2, 3, 4, 5]), tree(&[3, 1, 4, 2, 5])).await);
    }

    #[tokio::test]
    async fn test_prefix_is_not_same() {
        assert!(!same(tree(&[1, 2, 3]), tree(&[1, 2, 3, 4])).await);
    }

    #[tokio::test]
    async fn test_value_mismatch() {
        assert!(!same(tree(&[1, 2, 3]), tree(&[1, 2, 4])).await);
    }

    #[tokio::test]
    async fn test_random_trees() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let a = Arc::new(Tree::random(1, &mut rng));
            let b = Arc::new(Tree::random(1, &mut rng));
            let c = Arc::new(Tree::random(2, &mut rng));
            assert!(same(a.clone(), b).await);
            assert!(!same(a, c).await);
        }
    }
}
