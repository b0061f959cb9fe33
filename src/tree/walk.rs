// src/tree/walk.rs
// =============================================================================
// The Walker: an in-order traversal that sends every value down a channel.
//
// How it works:
// 1. Go as far left as possible, remembering the path on a stack
// 2. Pop a node, send its value
// 3. Continue with that node's right subtree
// 4. When the stack is empty, drop the sender - that closes the channel
//
// The walk itself is sequential. Concurrency comes from the caller running
// several walks as separate tasks.
//
// Rust concepts:
// - tokio::sync::mpsc: Multi-producer, single-consumer async channels
// - Dropping a Sender closes the channel for the receiver
// - Borrowing across .await inside an async fn
// =============================================================================

use tokio::sync::mpsc;
use tracing::debug;

use super::node::{Node, Tree};

// Walks `tree` in order, sending each value on `tx`
//
// Returns once every value has been sent, or as soon as the receiving side
// hangs up (nobody is listening, so there is no point in continuing).
pub async fn walk(tree: &Tree, tx: mpsc::Sender<i64>) {
    let mut stack: Vec<&Node> = Vec::new();
    let mut current = tree.root();

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left.as_deref();
        }

        let Some(node) = stack.pop() else {
            break;
        };

        debug!(value = node.value, "walked");
        if tx.send(node.value).await.is_err() {
            debug!("receiver dropped, stopping walk");
            return;
        }

        current = node.right.as_deref();
    }
    // tx is dropped here, which closes the channel
}

/// Runs a walk and collects everything it sends, in order.
pub async fn values(tree: &Tree) -> Vec<i64> {
    if tree.is_empty() {
        return Vec::new();
    }

    let (tx, mut rx) = mpsc::channel(1);

    let drain = async {
        let mut values = Vec::with_capacity(tree.len());
        while let Some(value) = rx.recv().await {
            values.push(value);
        }
        values
    };

    // Both halves run concurrently on this task: the walker blocks on a
    // full channel until the drain side makes room
    let ((), values) = tokio::join!(walk(tree, tx), drain);
    values
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an explicit stack instead of recursion?
//    - An async fn cannot call itself directly (its future would contain
//      itself and have infinite size)
//    - A Vec<&Node> stack gives the same left/node/right order without that
//
// 2. What does tx.send(...).await do?
//    - Waits until the channel has room, then puts the value in
//    - Returns Err if the receiver was dropped
//
// 3. How does the receiver know we're done?
//    - When every Sender is dropped, recv() returns None
//    - That's Rust's version of "closing" a channel
//
// 4. What is tokio::join!?
//    - Polls several futures concurrently on the current task
//    - Finishes when all of them have finished
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_walk_empty_tree_sends_nothing() {
        let tree = Tree::new();
        assert!(values(&tree).await.is_empty());
    }

    #[tokio::test]
    async fn test_walk_is_in_order() {
        let tree = Tree::from_values([50, 30, 70, 20, 40, 60, 80, 35]);
        let walked = values(&tree).await;
        assert_eq!(walked, vec![20, 30, 35, 40, 50, 60, 70, 80]);
        assert_eq!(walked.len(), tree.len());
    }

    #[tokio::test]
    async fn test_walk_closes_channel_when_done() {
        let tree = Tree::from_values([2, 1, 3]);
        let (tx, mut rx) = mpsc::channel(8);
        walk(&tree, tx).await;

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, Some(3));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_walk_stops_when_receiver_dropped() {
        let tree = Tree::from_values(1..=100);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        // Must return instead of blocking forever on a full channel
        walk(&tree, tx).await;
    }
}
