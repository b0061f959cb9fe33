// src/tree/node.rs
// =============================================================================
// The binary tree both walkers traverse.
//
// A Tree is a plain binary search tree of i64 values. Every node owns its
// children exclusively (Box), so there is no sharing and no cycles. Once a
// tree is built it is only ever read, which is what lets two tasks walk it
// through an Arc without any locking.
//
// Rust concepts:
// - Box<T>: Heap allocation with a single owner
// - Option<Box<Node>>: "maybe a child" - the idiomatic nullable pointer
// - Walking down &mut Option<...> slots for insertion
// =============================================================================

use rand::seq::SliceRandom;
use rand::Rng;

// A single node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: i64,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    fn leaf(value: i64) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }
}

/// A binary search tree. The empty tree has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Option<Box<Node>>,
}

impl Tree {
    /// Largest k accepted by `Tree::random` (10k must still fit in an i64)
    pub const MAX_K: i64 = i64::MAX / 10;
    /// Smallest k accepted by `Tree::random`
    pub const MIN_K: i64 = i64::MIN / 10;

    /// Creates an empty tree
    pub fn new() -> Self {
        Tree::default()
    }

    /// Builds a tree by inserting each value in iteration order
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut tree = Tree::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    /// Builds a tree holding k, 2k, ..., 10k inserted in a random order.
    ///
    /// Two trees built with the same k always hold the same sorted values,
    /// but their shapes usually differ - exactly what the comparator must
    /// see through.
    ///
    /// `k` must lie in `MIN_K..=MAX_K`; the CLI enforces this range.
    pub fn random<R: Rng + ?Sized>(k: i64, rng: &mut R) -> Self {
        debug_assert!((Tree::MIN_K..=Tree::MAX_K).contains(&k));
        let mut values: Vec<i64> = (1..=10).map(|i| i * k).collect();
        values.shuffle(rng);
        Tree::from_values(values)
    }

    // Smaller values go left, everything else goes right.
    // A loop, not recursion: sorted input builds a chain as deep as the tree
    pub fn insert(&mut self, value: i64) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::leaf(value)));
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        let mut stack: Vec<&Node> = self.root().into_iter().collect();
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

// The default drop would recurse once per level
impl Drop for Tree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_tree() {
        let tree = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_insert_orders_children() {
        let tree = Tree::from_values([5, 3, 8, 5]);
        let root = tree.root().unwrap();
        assert_eq!(root.value, 5);
        assert_eq!(root.left.as_ref().unwrap().value, 3);
        // Equal values go right
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.value, 8);
        assert_eq!(right.left.as_ref().unwrap().value, 5);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_random_tree_holds_multiples_of_k() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = Tree::random(3, &mut rng);
        assert_eq!(tree.len(), 10);

        let mut values = Vec::new();
        collect(tree.root(), &mut values);
        values.sort_unstable();
        assert_eq!(values, (1..=10).map(|i| i * 3).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_tree_at_k_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let high = Tree::random(Tree::MAX_K, &mut rng);
        let low = Tree::random(Tree::MIN_K, &mut rng);
        assert_eq!(high.len(), 10);
        assert_eq!(low.len(), 10);
    }

    #[test]
    fn test_sorted_input_builds_deep_chain() {
        // Every value goes right: a 10_000 level chain
        let tree = Tree::from_values(1..=10_000);
        assert_eq!(tree.len(), 10_000);
        assert!(tree.root().unwrap().left.is_none());
    }

    fn collect(node: Option<&Node>, out: &mut Vec<i64>) {
        if let Some(node) = node {
            out.push(node.value);
            collect(node.left.as_deref(), out);
            collect(node.right.as_deref(), out);
        }
    }
}
