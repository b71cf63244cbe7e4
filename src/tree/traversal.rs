//! Read-only tree walks
//!
//! Everything the presentation layer may ask of a quiescent tree: a lazy
//! in-order iterator, a pre-order structure walk (depth and branch side,
//! the raw material for console dumps), and a level-order grouping (the
//! raw material for layered GUI layouts). All three yield value snapshots,
//! never node references, so no caller can alias into the tree.

use std::collections::VecDeque;

use super::node::{Link, Node};
use crate::Key;

/// Point-in-time view of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSnapshot {
    /// The stored key.
    pub key: Key,
    /// Stored subtree height (leaf = 1).
    pub height: u32,
    /// Balance factor at snapshot time, always in −1..=1.
    pub balance: i32,
}

impl NodeSnapshot {
    pub(crate) fn of(node: &Node) -> Self {
        Self {
            key: node.key,
            height: node.height,
            balance: node.balance(),
        }
    }
}

/// Which parent link a structure entry hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    /// The tree root (no parent link).
    Root,
    /// Left child of the entry above it in the walk.
    Left,
    /// Right child of the entry above it in the walk.
    Right,
}

/// One entry of the pre-order structure walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureEntry {
    /// The node at this position.
    pub snapshot: NodeSnapshot,
    /// Distance from the root (root = 0).
    pub depth: usize,
    /// Parent link side.
    pub branch: Branch,
}

/// Lazy in-order iterator over node snapshots, smallest key first.
///
/// Restartable by asking the tree for a fresh one; the borrow keeps the
/// tree quiescent for the iterator's whole lifetime.
#[derive(Debug)]
pub struct InorderIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InorderIter<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl Iterator for InorderIter<'_> {
    type Item = NodeSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some(NodeSnapshot::of(node))
    }
}

/// Lazy pre-order iterator over [`StructureEntry`] values.
///
/// Parent first, then the whole left subtree, then the whole right subtree
/// (the order a recursive printer would visit), with each entry carrying
/// its depth and parent-link side.
#[derive(Debug)]
pub struct StructureIter<'a> {
    stack: Vec<(&'a Node, usize, Branch)>,
}

impl<'a> StructureIter<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        let mut stack = Vec::new();
        if let Some(node) = root.as_deref() {
            stack.push((node, 0, Branch::Root));
        }
        Self { stack }
    }
}

impl Iterator for StructureIter<'_> {
    type Item = StructureEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth, branch) = self.stack.pop()?;
        // Right pushed first so the left subtree pops (and yields) first.
        if let Some(right) = node.right.as_deref() {
            self.stack.push((right, depth + 1, Branch::Right));
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push((left, depth + 1, Branch::Left));
        }
        Some(StructureEntry {
            snapshot: NodeSnapshot::of(node),
            depth,
            branch,
        })
    }
}

/// Group snapshots by depth, root level first, left-to-right within a level.
pub(crate) fn collect_levels(root: &Link) -> Vec<Vec<NodeSnapshot>> {
    let mut levels: Vec<Vec<NodeSnapshot>> = Vec::new();
    let mut queue: VecDeque<(&Node, usize)> = VecDeque::new();
    if let Some(node) = root.as_deref() {
        queue.push_back((node, 0));
    }

    while let Some((node, depth)) = queue.pop_front() {
        if levels.len() == depth {
            levels.push(Vec::new());
        }
        levels[depth].push(NodeSnapshot::of(node));
        if let Some(left) = node.left.as_deref() {
            queue.push_back((left, depth + 1));
        }
        if let Some(right) = node.right.as_deref() {
            queue.push_back((right, depth + 1));
        }
    }

    levels
}
