//! Operation step log
//!
//! Append-only record of the decisions a single insert/delete/clear made:
//! comparisons on the way down, the structural change, height updates and
//! rotations on the way back up. The engine rebuilds the log at the start
//! of every mutating operation; the presentation layer drains it afterwards
//! and turns it into popup text, console output, or whatever it likes.

use std::fmt;

use crate::Key;

/// What kind of decision a [`Step`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// A descent comparison against an existing node.
    Compare,
    /// A new leaf was linked into the tree.
    Attach,
    /// A node was spliced out (leaf or single-child case).
    Detach,
    /// The in-order successor was selected for a two-child deletion.
    Successor,
    /// An ancestor's height was recomputed on the unwind.
    Height,
    /// A rebalancing rotation was applied.
    Rotate,
    /// The operation changed nothing (duplicate insert or missing delete).
    Unchanged,
    /// The whole tree was released.
    Clear,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Compare => "compare",
            Phase::Attach => "attach",
            Phase::Detach => "detach",
            Phase::Successor => "successor",
            Phase::Height => "height",
            Phase::Rotate => "rotate",
            Phase::Unchanged => "unchanged",
            Phase::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// The four imbalance cases of the rebalancing protocol.
///
/// Named after the imbalance, not the corrective motion: a `LeftLeft`
/// imbalance is fixed by a single right rotation, a `LeftRight` imbalance
/// by a left rotation at the child followed by a right rotation at the
/// node, and symmetrically for the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationKind {
    /// Left-heavy node with a non-right-leaning left child: single right rotation.
    LeftLeft,
    /// Left-heavy node with a right-leaning left child: double rotation.
    LeftRight,
    /// Right-heavy node with a non-left-leaning right child: single left rotation.
    RightRight,
    /// Right-heavy node with a left-leaning right child: double rotation.
    RightLeft,
}

impl RotationKind {
    /// Whether this case resolves with two single rotations.
    pub fn is_double(self) -> bool {
        matches!(self, RotationKind::LeftRight | RotationKind::RightLeft)
    }
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationKind::LeftLeft => "left-left",
            RotationKind::LeftRight => "left-right",
            RotationKind::RightRight => "right-right",
            RotationKind::RightLeft => "right-left",
        };
        f.write_str(name)
    }
}

/// One immutable record in the trace of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Decision kind.
    pub phase: Phase,
    /// Key the step is about. `None` only for [`Phase::Clear`], which has
    /// no single affected key.
    pub key: Option<Key>,
    /// Imbalance case, set on [`Phase::Rotate`] steps.
    pub rotation: Option<RotationKind>,
    /// Human-readable account of the decision.
    pub description: String,
}

/// Append-only recorder owned by the engine.
///
/// Entries are pushed in the order decisions are taken and handed out in
/// that order. Draining clears the log; the engine also resets it at the
/// start of every mutating operation, so a drain always yields the trace
/// of exactly the most recent one.
#[derive(Debug, Default)]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded since the last reset or drain.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Peek at the recorded steps without consuming them.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Take all recorded steps, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }

    /// Drop any leftover trace before a new operation starts recording.
    pub(crate) fn reset(&mut self) {
        self.steps.clear();
    }

    /// Record a non-rotation step.
    pub(crate) fn push(&mut self, phase: Phase, key: Option<Key>, description: String) {
        self.steps.push(Step {
            phase,
            key,
            rotation: None,
            description,
        });
    }

    /// Record a rotation step with its imbalance case.
    pub(crate) fn push_rotation(&mut self, kind: RotationKind, key: Key, description: String) {
        self.steps.push(Step {
            phase: Phase::Rotate,
            key: Some(key),
            rotation: Some(kind),
            description,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut log = StepLog::new();
        log.push(Phase::Compare, Some(5), "5 < 10: descending left from 10".into());
        log.push(Phase::Attach, Some(5), "attached 5 as left child of 10".into());

        let phases: Vec<Phase> = log.steps().iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![Phase::Compare, Phase::Attach]);
    }

    #[test]
    fn test_drain_empties_log() {
        let mut log = StepLog::new();
        log.push(Phase::Clear, None, "cleared 3 nodes".into());
        assert_eq!(log.len(), 1);

        let steps = log.drain();
        assert_eq!(steps.len(), 1);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }

    #[test]
    fn test_reset_discards_stale_trace() {
        let mut log = StepLog::new();
        log.push(Phase::Attach, Some(1), "attached 1 as the root".into());
        log.reset();
        assert!(log.is_empty());
    }

    #[test]
    fn test_rotation_step_carries_kind() {
        let mut log = StepLog::new();
        log.push_rotation(
            RotationKind::RightRight,
            10,
            "right-right imbalance at 10: rotating left".into(),
        );

        let step = &log.steps()[0];
        assert_eq!(step.phase, Phase::Rotate);
        assert_eq!(step.key, Some(10));
        assert_eq!(step.rotation, Some(RotationKind::RightRight));
    }

    #[test]
    fn test_double_rotation_classification() {
        assert!(RotationKind::LeftRight.is_double());
        assert!(RotationKind::RightLeft.is_double());
        assert!(!RotationKind::LeftLeft.is_double());
        assert!(!RotationKind::RightRight.is_double());
    }
}
