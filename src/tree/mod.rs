//! Self-balancing search tree engine
//!
//! [`AvlTree`] owns the node structure and performs insert/delete with
//! rotation-based rebalancing, recording every algorithmic decision into a
//! step log for the presentation layer. Insert and delete are recursive:
//! each call returns the (possibly new) root of the subtree it worked on,
//! so backtracking up the operation path is the call stack unwinding, and
//! heights and balance factors are repaired ancestor by ancestor on the
//! way out.

pub(crate) mod node;
mod rotation;
mod traversal;

pub use traversal::{Branch, InorderIter, NodeSnapshot, StructureEntry, StructureIter};

use std::cmp::Ordering;

use tracing::debug;

use self::node::{height, Link, Node};
use self::rotation::rebalance;
use crate::trace::{Phase, Step, StepLog};
use crate::Key;

/// Result of [`AvlTree::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was not present and is now stored.
    Inserted,
    /// The key was already stored; the tree is untouched.
    AlreadyPresent,
}

/// Result of [`AvlTree::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The key was present and has been removed.
    Deleted,
    /// The key was not in the tree; the tree is untouched.
    NotFound,
}

/// AVL tree over unique integer keys, with a step log of every mutation.
///
/// After every completed operation the tree satisfies the AVL invariants:
/// strict BST ordering, per-node height difference of at most one, and
/// stored heights equal to `1 + max(child heights)`. Debug builds assert
/// this after each mutating call.
///
/// ```
/// use landis::{AvlTree, InsertOutcome};
///
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30); // right-right imbalance: rotates left around 10
///
/// let keys: Vec<i64> = tree.iter().map(|snap| snap.key).collect();
/// assert_eq!(keys, vec![10, 20, 30]);
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.insert(20), InsertOutcome::AlreadyPresent);
/// ```
#[derive(Debug, Default)]
pub struct AvlTree {
    root: Link,
    len: usize,
    log: StepLog,
}

impl AvlTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored height of the whole tree (0 when empty, 1 for a lone root).
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Worst-case AVL height for the current size: ⌈1.44·log₂(n+2)⌉.
    ///
    /// The actual height never exceeds this; the presentation layer shows
    /// it next to [`height`](Self::height) and the bound tests rely on it.
    pub fn height_bound(&self) -> u32 {
        (1.44 * ((self.len as f64) + 2.0).log2()).ceil() as u32
    }

    /// Whether `key` is stored. Read-only; emits no steps.
    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Insert `key`, rebalancing as needed.
    ///
    /// A duplicate returns [`InsertOutcome::AlreadyPresent`] and changes
    /// nothing — turning that into a delete is the caller's policy, not
    /// the engine's. The step log is rebuilt with this operation's trace.
    pub fn insert(&mut self, key: Key) -> InsertOutcome {
        self.log.reset();
        let (root, inserted) = insert_at(self.root.take(), key, None, &mut self.log);
        self.root = root;
        let outcome = if inserted {
            self.len += 1;
            InsertOutcome::Inserted
        } else {
            InsertOutcome::AlreadyPresent
        };
        debug!(key, ?outcome, steps = self.log.len(), "insert");
        self.assert_invariants();
        outcome
    }

    /// Delete `key`, rebalancing as needed.
    ///
    /// An absent key returns [`DeleteOutcome::NotFound`] and changes
    /// nothing. A node with two children takes its in-order successor's
    /// key and the successor is removed from the right subtree; unlike
    /// insertion, the unwind may rotate at several ancestors. The step
    /// log is rebuilt with this operation's trace.
    pub fn delete(&mut self, key: Key) -> DeleteOutcome {
        self.log.reset();
        let (root, deleted) = delete_at(self.root.take(), key, &mut self.log);
        self.root = root;
        let outcome = if deleted {
            self.len -= 1;
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        };
        debug!(key, ?outcome, steps = self.log.len(), "delete");
        self.assert_invariants();
        outcome
    }

    /// Release every node. Ownership of the whole structure is dropped as
    /// a unit; the step log records a single clear marker.
    pub fn clear(&mut self) {
        self.log.reset();
        let dropped = self.len;
        self.root = None;
        self.len = 0;
        self.log
            .push(Phase::Clear, None, format!("cleared {dropped} nodes"));
        debug!(dropped, "clear");
    }

    /// Lazy in-order walk over `(key, height, balance)` snapshots.
    ///
    /// Safe to call between operations, never during one — the borrow
    /// checker enforces exactly that.
    pub fn iter(&self) -> InorderIter<'_> {
        InorderIter::new(&self.root)
    }

    /// Pre-order walk with depth and branch side, for structure dumps.
    pub fn structure(&self) -> StructureIter<'_> {
        StructureIter::new(&self.root)
    }

    /// Snapshots grouped by depth, for layered layouts.
    pub fn levels(&self) -> Vec<Vec<NodeSnapshot>> {
        traversal::collect_levels(&self.root)
    }

    /// Peek at the trace of the most recent mutating operation.
    pub fn steps(&self) -> &[Step] {
        self.log.steps()
    }

    /// Take the trace of the most recent mutating operation, leaving the
    /// log empty until the next insert/delete/clear.
    pub fn drain_steps(&mut self) -> Vec<Step> {
        self.log.drain()
    }

    pub(crate) fn root_link(&self) -> &Link {
        &self.root
    }

    /// Invariant violations are implementation defects, not runtime
    /// errors; debug builds fail fast on them.
    fn assert_invariants(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = crate::verify::check(self) {
            panic!("AVL invariant violated after operation: {violation}");
        }
    }
}

fn insert_at(link: Link, key: Key, parent: Option<Key>, log: &mut StepLog) -> (Link, bool) {
    let Some(mut node) = link else {
        let description = match parent {
            Some(parent) => format!("attached {key} as a new leaf under {parent}"),
            None => format!("tree was empty: {key} becomes the root"),
        };
        log.push(Phase::Attach, Some(key), description);
        return (Some(Node::leaf(key)), true);
    };

    let at = node.key;
    let inserted = match key.cmp(&at) {
        Ordering::Less => {
            log.push(
                Phase::Compare,
                Some(key),
                format!("{key} < {at}: descending left from {at}"),
            );
            let (child, inserted) = insert_at(node.left.take(), key, Some(at), log);
            node.left = child;
            inserted
        }
        Ordering::Greater => {
            log.push(
                Phase::Compare,
                Some(key),
                format!("{key} > {at}: descending right from {at}"),
            );
            let (child, inserted) = insert_at(node.right.take(), key, Some(at), log);
            node.right = child;
            inserted
        }
        Ordering::Equal => {
            log.push(
                Phase::Unchanged,
                Some(key),
                format!("{key} already present: tree unchanged"),
            );
            false
        }
    };

    if !inserted {
        // Nothing below changed, so neither heights nor balance did.
        return (Some(node), false);
    }

    node.update_height();
    log.push(
        Phase::Height,
        Some(node.key),
        format!(
            "height of {} recomputed to {} (balance {})",
            node.key,
            node.height,
            node.balance()
        ),
    );
    (Some(rebalance(node, log)), true)
}

fn delete_at(link: Link, key: Key, log: &mut StepLog) -> (Link, bool) {
    let Some(mut node) = link else {
        log.push(
            Phase::Unchanged,
            Some(key),
            format!("{key} not found: tree unchanged"),
        );
        return (None, false);
    };

    let at = node.key;
    let deleted = match key.cmp(&at) {
        Ordering::Less => {
            log.push(
                Phase::Compare,
                Some(key),
                format!("{key} < {at}: descending left from {at}"),
            );
            let (child, deleted) = delete_at(node.left.take(), key, log);
            node.left = child;
            deleted
        }
        Ordering::Greater => {
            log.push(
                Phase::Compare,
                Some(key),
                format!("{key} > {at}: descending right from {at}"),
            );
            let (child, deleted) = delete_at(node.right.take(), key, log);
            node.right = child;
            deleted
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                log.push(Phase::Detach, Some(key), format!("removed leaf {key}"));
                return (None, true);
            }
            (Some(child), None) => {
                log.push(
                    Phase::Detach,
                    Some(key),
                    format!("removed {key}: left child {} takes its place", child.key),
                );
                return (Some(child), true);
            }
            (None, Some(child)) => {
                log.push(
                    Phase::Detach,
                    Some(key),
                    format!("removed {key}: right child {} takes its place", child.key),
                );
                return (Some(child), true);
            }
            (Some(left), Some(right)) => {
                let successor = min_key(&right);
                log.push(
                    Phase::Successor,
                    Some(key),
                    format!("{key} has two children: replacing with in-order successor {successor}"),
                );
                node.key = successor;
                node.left = Some(left);
                let (new_right, removed) = delete_at(Some(right), successor, log);
                debug_assert!(removed, "successor key exists in the right subtree");
                node.right = new_right;
                true
            }
        },
    };

    if !deleted {
        return (Some(node), false);
    }

    node.update_height();
    log.push(
        Phase::Height,
        Some(node.key),
        format!(
            "height of {} recomputed to {} (balance {})",
            node.key,
            node.height,
            node.balance()
        ),
    );
    (Some(rebalance(node, log)), true)
}

/// Smallest key in a non-empty subtree: the leftmost node.
fn min_key(node: &Node) -> Key {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.key
}
