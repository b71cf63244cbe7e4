//! Tree node storage
//!
//! One heap allocation per key, children exclusively owned through
//! `Option<Box<Node>>` links. No parent pointers: the ancestor chain of an
//! operation lives on the recursive call stack. Heights are stored, not
//! recomputed on demand — a leaf has height 1, an empty link height 0, and
//! every mutation restores `height = 1 + max(left, right)` on its way out.

use crate::Key;

/// Owned link to a subtree; `None` is the empty tree.
pub(crate) type Link = Option<Box<Node>>;

/// One key in the tree.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) height: u32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    /// Fresh leaf with no children.
    pub(crate) fn leaf(key: Key) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Restore the stored height from the children's stored heights.
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Balance factor: height(left) − height(right).
    ///
    /// Positive means left-heavy. The AVL invariant keeps this in −1..=1
    /// between operations; ±2 appears only transiently on the rebalancing
    /// unwind.
    pub(crate) fn balance(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

/// Height of a link: 0 for empty, the stored height otherwise.
pub(crate) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}
