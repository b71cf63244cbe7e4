//! Structural invariant checking
//!
//! [`check`] walks a whole tree and verifies the four invariants the engine
//! promises after every completed operation: strict BST ordering, the ≤1
//! balance bound, stored heights matching the structure, and the cached node
//! count matching the walk. A violation is an implementation defect, never a
//! runtime condition to recover from — debug builds assert [`check`] after
//! each mutation, and the test suite calls it after every step of every
//! scenario.

use thiserror::Error;

use crate::tree::node::Link;
use crate::tree::AvlTree;
use crate::Key;

/// A structural invariant found broken by [`check`].
#[derive(Debug, Error)]
pub enum InvariantViolation {
    /// A key sits on the wrong side of an ancestor.
    #[error("BST order violated: {key} outside ({lower:?}, {upper:?})")]
    Order {
        /// The offending key.
        key: Key,
        /// Exclusive lower bound inherited from the ancestor chain.
        lower: Option<Key>,
        /// Exclusive upper bound inherited from the ancestor chain.
        upper: Option<Key>,
    },

    /// Child subtree heights differ by more than one.
    #[error("balance violated at {key}: left subtree height {left}, right {right}")]
    Balance {
        /// Node where the bound is exceeded.
        key: Key,
        /// Computed left subtree height.
        left: u32,
        /// Computed right subtree height.
        right: u32,
    },

    /// A stored height disagrees with the structure below it.
    #[error("stored height at {key} is {stored}, structure says {computed}")]
    StoredHeight {
        /// Node with the stale height.
        key: Key,
        /// Height recorded in the node.
        stored: u32,
        /// Height recomputed from the children.
        computed: u32,
    },

    /// The cached node count disagrees with the walk.
    #[error("tree len is {len} but the walk found {counted} nodes")]
    Count {
        /// Count the tree reports.
        len: usize,
        /// Nodes the walk actually visited.
        counted: usize,
    },
}

/// Walk `tree` and verify every invariant, reporting the first violation.
pub fn check(tree: &AvlTree) -> Result<(), InvariantViolation> {
    let (_, counted) = walk(tree.root_link(), None, None)?;
    if counted != tree.len() {
        return Err(InvariantViolation::Count {
            len: tree.len(),
            counted,
        });
    }
    Ok(())
}

/// Recursive walk returning (computed height, node count). Bounds are
/// exclusive and narrow on the way down, so ordering is checked against the
/// whole ancestor chain, not just the parent.
fn walk(
    link: &Link,
    lower: Option<Key>,
    upper: Option<Key>,
) -> Result<(u32, usize), InvariantViolation> {
    let Some(node) = link.as_deref() else {
        return Ok((0, 0));
    };

    if lower.is_some_and(|bound| node.key <= bound) || upper.is_some_and(|bound| node.key >= bound)
    {
        return Err(InvariantViolation::Order {
            key: node.key,
            lower,
            upper,
        });
    }

    let (left, left_count) = walk(&node.left, lower, Some(node.key))?;
    let (right, right_count) = walk(&node.right, Some(node.key), upper)?;

    if left.abs_diff(right) > 1 {
        return Err(InvariantViolation::Balance {
            key: node.key,
            left,
            right,
        });
    }

    let computed = 1 + left.max(right);
    if node.height != computed {
        return Err(InvariantViolation::StoredHeight {
            key: node.key,
            stored: node.height,
            computed,
        });
    }

    Ok((computed, 1 + left_count + right_count))
}
