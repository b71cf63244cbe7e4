//! # Explainable AVL Tree Engine
//!
//! This library implements an AVL (Adelson-Velsky and Landis) self-balancing
//! binary search tree that explains itself: every insert and delete records
//! a structured trace of the comparisons, height updates, and rotations it
//! performed, for a presentation layer (GUI, CLI, or test harness) to show.
//!
//! ## Core Algorithm
//!
//! 1. **BST descent**: compare and descend to the mutation point
//! 2. **Structural change**: attach a leaf, splice a node out, or swap in
//!    the in-order successor
//! 3. **Unwind**: recompute stored heights ancestor by ancestor on the way
//!    back up the operation path
//! 4. **Rebalance**: resolve any |balance factor| > 1 with one of four
//!    rotation cases
//!
//! Result: height ≤ 1.44·log₂(n + 2) after every operation
//!
//! ## Usage Example
//!
//! ```
//! use landis::{AvlTree, Phase};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30); // right-right imbalance: rotates left around 10
//!
//! let steps = tree.drain_steps();
//! assert!(steps.iter().any(|step| step.phase == Phase::Rotate));
//!
//! let keys: Vec<i64> = tree.iter().map(|snap| snap.key).collect();
//! assert_eq!(keys, vec![10, 20, 30]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - each implements one component of the engine
pub mod tree; // AVL engine: insert/delete/rebalance plus read-only queries
pub mod trace; // Step log recording every algorithmic decision
pub mod verify; // Invariant walker behind debug assertions and tests

// Re-exports for convenience
pub use trace::{Phase, RotationKind, Step, StepLog};
pub use tree::{
    AvlTree, Branch, DeleteOutcome, InorderIter, InsertOutcome, NodeSnapshot, StructureEntry,
    StructureIter,
};
pub use verify::InvariantViolation;

/// Integer key type stored by the tree.
///
/// The engine is a closed structure over the full signed range; the
/// positive-integers-only rule of the interactive session is a
/// presentation-layer contract, not an engine one.
pub type Key = i64;
