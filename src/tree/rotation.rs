//! Rebalancing rotations
//!
//! A node whose balance factor leaves −1..=1 is resolved by one of four
//! cases, classified from the heavy child's own balance:
//!
//! | condition                  | case        | action                      |
//! |----------------------------|-------------|-----------------------------|
//! | bf > 1, bf(left) ≥ 0       | Left-Left   | right rotation              |
//! | bf > 1, bf(left) < 0       | Left-Right  | left at child, right here   |
//! | bf < −1, bf(right) ≤ 0     | Right-Right | left rotation               |
//! | bf < −1, bf(right) > 0     | Right-Left  | right at child, left here   |
//!
//! A child balance of exactly 0 (possible after deletions, never after a
//! single insertion) takes the single-rotation case, which keeps rotation
//! sequences deterministic and reproducible.

use tracing::trace;

use super::node::Node;
use crate::trace::{RotationKind, StepLog};

/// Rotate left around `node`; its right child becomes the subtree root.
///
/// Updates exactly the two pivot heights, in child-before-parent order.
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut new_root = node
        .right
        .take()
        .expect("left rotation requires a right child");
    node.right = new_root.left.take();
    node.update_height();
    new_root.left = Some(node);
    new_root.update_height();
    new_root
}

/// Rotate right around `node`; its left child becomes the subtree root.
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut new_root = node
        .left
        .take()
        .expect("right rotation requires a left child");
    node.left = new_root.right.take();
    node.update_height();
    new_root.right = Some(node);
    new_root.update_height();
    new_root
}

/// Resolve an imbalance at `node`, if any, and return the subtree root to
/// hand back to the parent link.
///
/// Expects `node`'s stored height to be current. Emits one `Rotate` step
/// per resolution (a double rotation is one step, carrying its case).
pub(super) fn rebalance(mut node: Box<Node>, log: &mut StepLog) -> Box<Node> {
    let bf = node.balance();
    if (-1..=1).contains(&bf) {
        return node;
    }

    let pivot = node.key;
    if bf > 1 {
        let left_bf = node.left.as_ref().map_or(0, |n| n.balance());
        if left_bf >= 0 {
            let kind = RotationKind::LeftLeft;
            let root = rotate_right(node);
            trace!(pivot, %kind, new_root = root.key, "rotation");
            log.push_rotation(
                kind,
                pivot,
                format!(
                    "{kind} imbalance at {pivot}: rotated right, {} is the new subtree root",
                    root.key
                ),
            );
            root
        } else {
            let kind = RotationKind::LeftRight;
            let child = node.left.take().expect("left-heavy node has a left child");
            let child_key = child.key;
            node.left = Some(rotate_left(child));
            let root = rotate_right(node);
            trace!(pivot, %kind, child = child_key, new_root = root.key, "rotation");
            log.push_rotation(
                kind,
                pivot,
                format!(
                    "{kind} imbalance at {pivot}: rotated left at {child_key}, \
                     then right at {pivot}; {} is the new subtree root",
                    root.key
                ),
            );
            root
        }
    } else {
        let right_bf = node.right.as_ref().map_or(0, |n| n.balance());
        if right_bf <= 0 {
            let kind = RotationKind::RightRight;
            let root = rotate_left(node);
            trace!(pivot, %kind, new_root = root.key, "rotation");
            log.push_rotation(
                kind,
                pivot,
                format!(
                    "{kind} imbalance at {pivot}: rotated left, {} is the new subtree root",
                    root.key
                ),
            );
            root
        } else {
            let kind = RotationKind::RightLeft;
            let child = node
                .right
                .take()
                .expect("right-heavy node has a right child");
            let child_key = child.key;
            node.right = Some(rotate_right(child));
            let root = rotate_left(node);
            trace!(pivot, %kind, child = child_key, new_root = root.key, "rotation");
            log.push_rotation(
                kind,
                pivot,
                format!(
                    "{kind} imbalance at {pivot}: rotated right at {child_key}, \
                     then left at {pivot}; {} is the new subtree root",
                    root.key
                ),
            );
            root
        }
    }
}
