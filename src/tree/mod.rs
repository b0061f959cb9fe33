// src/tree/mod.rs
// =============================================================================
// This module holds the binary tree equivalence exercise.
//
// Submodules:
// - node: The immutable binary search tree we walk
// - walk: The Walker - sends a tree's values, in order, down a channel
// - compare: The Comparator - walks two trees at once and compares them
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod compare;
mod node;
mod walk;

pub use compare::same;
pub use node::Tree;
pub use walk::values;
