//! Step log integration tests: what each operation records, in what order,
//! and when the log resets

use landis::{AvlTree, DeleteOutcome, Phase, RotationKind, Step};

use test_helpers::*;

fn phases(steps: &[Step]) -> Vec<Phase> {
    steps.iter().map(|step| step.phase).collect()
}

#[test]
fn test_first_insert_records_a_single_attach() {
    let mut tree = AvlTree::new();
    tree.insert(10);

    let steps = tree.drain_steps();
    assert_eq!(phases(&steps), vec![Phase::Attach]);
    assert_eq!(steps[0].key, Some(10));
    assert!(
        steps[0].description.contains("root"),
        "got: {}",
        steps[0].description
    );
}

#[test]
fn test_insert_records_descent_attach_and_unwind() {
    let mut tree = tree_from(&[10]);
    tree.insert(20);

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Compare, Phase::Attach, Phase::Height]
    );
    assert_eq!(steps[0].key, Some(20), "comparisons are about the new key");
    assert_eq!(steps[1].key, Some(20));
    assert_eq!(steps[2].key, Some(10), "the parent's height is recomputed");
}

#[test]
fn test_rotating_insert_ends_with_the_rotation() {
    let mut tree = tree_from(&[10, 20]);
    tree.drain_steps();
    tree.insert(30);

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![
            Phase::Compare,
            Phase::Compare,
            Phase::Attach,
            Phase::Height,
            Phase::Height,
            Phase::Rotate,
        ]
    );

    let rotation = steps.last().expect("trace is non-empty");
    assert_eq!(rotation.rotation, Some(RotationKind::RightRight));
    assert_eq!(rotation.key, Some(10), "the unbalanced node is the pivot");
    assert!(
        rotation.description.contains("right-right"),
        "got: {}",
        rotation.description
    );
}

#[test]
fn test_duplicate_insert_records_unchanged_and_stops() {
    let mut tree = tree_from(&[20, 10, 30]);
    tree.drain_steps();
    tree.insert(10);

    let steps = tree.drain_steps();
    assert_eq!(phases(&steps), vec![Phase::Compare, Phase::Unchanged]);
    assert!(
        steps.iter().all(|step| step.phase != Phase::Height),
        "nothing changed, so no heights were recomputed"
    );
}

#[test]
fn test_delete_leaf_trace() {
    let mut tree = tree_from(&[20, 10, 30]);
    tree.drain_steps();
    tree.delete(10);

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Compare, Phase::Detach, Phase::Height]
    );
    assert_eq!(steps[1].key, Some(10));
}

#[test]
fn test_delete_single_child_node_promotes_the_child() {
    let mut tree = tree_from(&[20, 10, 30, 5]);
    tree.drain_steps();
    tree.delete(10);

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Compare, Phase::Detach, Phase::Height]
    );
    assert!(
        steps[1].description.contains('5'),
        "the detach step names the promoted child: {}",
        steps[1].description
    );
    assert_eq!(keys_of(&tree), vec![5, 20, 30]);
}

#[test]
fn test_two_child_delete_records_successor_selection() {
    let mut tree = tree_from(&[20, 10, 30]);
    tree.drain_steps();
    tree.delete(20);

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Successor, Phase::Detach, Phase::Height]
    );
    assert_eq!(steps[0].key, Some(20));
    assert!(
        steps[0].description.contains("30"),
        "the successor step names the chosen key: {}",
        steps[0].description
    );
    assert_eq!(
        steps[1].key,
        Some(30),
        "the successor is detached from its old position"
    );
    assert_eq!(keys_of(&tree), vec![10, 30]);
}

#[test]
fn test_delete_absent_records_the_failed_search() {
    let mut tree = tree_from(&[20, 10, 30]);
    let before = shape_of(&tree);
    tree.drain_steps();

    assert_eq!(tree.delete(99), DeleteOutcome::NotFound);
    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Compare, Phase::Compare, Phase::Unchanged]
    );
    assert_eq!(shape_of(&tree), before);
}

#[test]
fn test_drain_clears_the_log() {
    let mut tree = tree_from(&[10, 20, 30]);
    assert!(!tree.drain_steps().is_empty());
    assert!(tree.drain_steps().is_empty());
    assert!(tree.steps().is_empty());
}

#[test]
fn test_log_holds_only_the_most_recent_operation() {
    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(20); // first trace never drained

    let steps = tree.drain_steps();
    assert_eq!(
        phases(&steps),
        vec![Phase::Compare, Phase::Attach, Phase::Height],
        "the undrained insert-10 trace was discarded"
    );
    assert_eq!(steps[1].key, Some(20));
}

#[test]
fn test_clear_records_a_single_marker() {
    let mut tree = tree_from(&[20, 10, 30]);
    tree.clear();

    let steps = tree.drain_steps();
    assert_eq!(phases(&steps), vec![Phase::Clear]);
    assert_eq!(steps[0].key, None, "clear affects no single key");
    assert!(
        steps[0].description.contains('3'),
        "the marker reports how many nodes were released: {}",
        steps[0].description
    );
}

#[test]
fn test_contains_and_traversals_record_nothing() {
    let mut tree = tree_from(&[20, 10, 30]);
    tree.drain_steps();

    tree.contains(10);
    tree.contains(99);
    let _ = tree.iter().count();
    let _ = tree.levels();
    let _ = tree.structure().count();

    assert!(tree.steps().is_empty(), "read-only queries emit no steps");
}

#[test]
fn test_double_rotation_is_one_step() {
    let mut tree = tree_from(&[30, 10]);
    tree.drain_steps();
    tree.insert(20);

    let steps = tree.drain_steps();
    let rotations: Vec<&Step> = steps
        .iter()
        .filter(|step| step.phase == Phase::Rotate)
        .collect();
    assert_eq!(rotations.len(), 1, "a double rotation is a single decision");
    assert_eq!(rotations[0].rotation, Some(RotationKind::LeftRight));
    assert!(rotations[0]
        .rotation
        .expect("rotation kind is set")
        .is_double());
}
