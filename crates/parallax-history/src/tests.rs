//! Unit tests for parallax-history

use crate::history::{HistoryEvent, SelectionHistory};
use crate::snapshot::{SelectionSnapshot, SnapshotEvent};
use parallax_core::{
    Address, ElementKey, FunctionMatch, GraphKind, Label, MatchEvent, NodeData, NodeKey, Side,
    ViewGraph,
};
use std::cell::RefCell;
use std::rc::Rc;

fn function_pair() -> FunctionMatch {
    FunctionMatch {
        primary: Address(0x401000),
        secondary: Address(0x8000),
    }
}

fn primary_graph_with_blocks(addresses: &[u64]) -> ViewGraph {
    let mut graph = ViewGraph::new(GraphKind::Single(Side::Primary), function_pair());
    for &address in addresses {
        graph.add_node(
            NodeData::single(Side::Primary, Address(address)),
            Label::empty(),
        );
    }
    graph
}

/// Combined view before the match edit: 0x10 and 0x20 are separate unmatched
/// nodes.
fn combined_split() -> ViewGraph {
    let mut graph = ViewGraph::new(GraphKind::Combined, function_pair());
    graph.add_node(NodeData::combined(Some(Address(0x10)), None), Label::empty());
    graph.add_node(NodeData::combined(None, Some(Address(0x20))), Label::empty());
    graph
}

/// Combined view after the match edit: one merged matched node.
fn combined_merged() -> ViewGraph {
    let mut graph = ViewGraph::new(GraphKind::Combined, function_pair());
    graph.add_node(
        NodeData::combined(Some(Address(0x10)), Some(Address(0x20))),
        Label::empty(),
    );
    graph
}

fn collect_events(history: &mut SelectionHistory) -> Rc<RefCell<Vec<HistoryEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    history.subscribe(move |event| sink.borrow_mut().push(*event));
    events
}

#[test]
fn test_seeded_with_empty_snapshot() {
    let graph = primary_graph_with_blocks(&[0x10]);
    let history = SelectionHistory::new(&graph, 10);

    assert_eq!(history.snapshot_count(), 1);
    assert_eq!(history.undo_index(), 0);
    assert_eq!(history.snapshot(0).unwrap().description(), "No selection");
}

#[test]
#[should_panic(expected = "no selection history")]
fn test_super_graph_has_no_history() {
    let graph = ViewGraph::new(GraphKind::Super, function_pair());
    let _ = SelectionHistory::new(&graph, 10);
}

#[test]
fn test_fifo_eviction_past_capacity() {
    let mut graph = primary_graph_with_blocks(&[0x10, 0x20, 0x30, 0x40, 0x50]);
    let mut history = SelectionHistory::new(&graph, 3);
    let events = collect_events(&mut history);

    let ids: Vec<_> = graph.all_nodes().map(|n| n.id).collect();
    for &id in &ids {
        let previous = graph.selected_nodes();
        graph.select_nodes(&[id], &previous);
        history.record(&graph);
    }

    // Seed snapshot + 5 recordings, capacity 3: the three oldest were evicted
    // from index 0, in order.
    assert_eq!(history.snapshot_count(), 3);
    let removed = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, HistoryEvent::SnapshotRemoved(0)))
        .count();
    assert_eq!(removed, 3);
    assert_eq!(history.undo_index(), 2);

    // FIFO: the retained snapshots are the three most recent selections.
    let expected: Vec<_> = ids[2..]
        .iter()
        .map(|&id| {
            ElementKey::Node(graph.node(id).unwrap().data.key())
        })
        .collect();
    for (i, key) in expected.iter().enumerate() {
        assert_eq!(history.snapshot(i).unwrap().elements(), &[*key]);
    }
}

#[test]
fn test_undo_redo_clamp_at_ends() {
    let mut graph = primary_graph_with_blocks(&[0x10]);
    let id = graph.all_nodes().next().unwrap().id;
    let mut history = SelectionHistory::new(&graph, 10);

    graph.select_nodes(&[id], &[]);
    history.record(&graph);
    assert_eq!(history.undo_index(), 1);

    history.undo(&mut graph);
    assert_eq!(history.undo_index(), 0);
    assert!(graph.selected_nodes().is_empty());

    // Already at 0: stays, no negative index.
    history.undo(&mut graph);
    assert_eq!(history.undo_index(), 0);

    history.redo(&mut graph);
    assert_eq!(history.undo_index(), 1);
    assert_eq!(graph.selected_nodes(), vec![id]);

    // Already at the last index: stays.
    history.redo(&mut graph);
    assert_eq!(history.undo_index(), 1);
    assert_eq!(graph.selected_nodes(), vec![id]);
}

#[test]
fn test_undo_brackets_with_events_and_does_not_record() {
    let mut graph = primary_graph_with_blocks(&[0x10]);
    let id = graph.all_nodes().next().unwrap().id;
    let mut history = SelectionHistory::new(&graph, 10);

    graph.select_nodes(&[id], &[]);
    history.record(&graph);

    let events = collect_events(&mut history);
    history.undo(&mut graph);

    assert_eq!(
        events.borrow().as_slice(),
        &[HistoryEvent::StartedUndo, HistoryEvent::FinishedUndo]
    );
    // Replaying the snapshot must not have enqueued a new one.
    assert_eq!(history.snapshot_count(), 2);
}

#[test]
fn test_freeze_blocks_recording() {
    let mut graph = primary_graph_with_blocks(&[0x10, 0x20]);
    let ids: Vec<_> = graph.all_nodes().map(|n| n.id).collect();
    let mut history = SelectionHistory::new(&graph, 10);

    history.set_enabled(false);
    for &id in &ids {
        graph.select_nodes(&[id], &[]);
        history.record(&graph);
    }
    assert_eq!(history.snapshot_count(), 1);

    history.set_enabled(true);
    history.record(&graph);
    assert_eq!(history.snapshot_count(), 2);
}

#[test]
fn test_single_side_patch_notifies_touched_snapshots() {
    let mut graph = primary_graph_with_blocks(&[0x10, 0x20]);
    let id = graph.node_on_side(Side::Primary, Address(0x10)).unwrap();
    let mut history = SelectionHistory::new(&graph, 10);

    graph.select_nodes(&[id], &[]);
    history.record(&graph);

    let finished = Rc::new(RefCell::new(0usize));
    let sink = finished.clone();
    history
        .snapshot_mut(1)
        .unwrap()
        .subscribe(move |event| {
            if matches!(event, SnapshotEvent::Finished) {
                *sink.borrow_mut() += 1;
            }
        });

    // Rebuild (same addresses) and deliver the edit.
    let rebuilt = primary_graph_with_blocks(&[0x10, 0x20]);
    let event = MatchEvent::added(function_pair(), Address(0x10), Address(0x30));
    history.process_match_event(&event, &rebuilt);

    assert_eq!(*finished.borrow(), 1);
    // The address-derived key still resolves in the rebuilt graph.
    let key = NodeKey::Single {
        side: Side::Primary,
        address: Address(0x10),
    };
    assert!(rebuilt.node_by_key(&key).is_some());
}

#[test]
fn test_patch_ignores_other_function_pairs() {
    let graph = combined_split();
    let mut history = SelectionHistory::new(&graph, 10);
    let events = collect_events(&mut history);

    let other = FunctionMatch {
        primary: Address(0xDEAD),
        secondary: Address(0xBEEF),
    };
    let event = MatchEvent::added(other, Address(0x10), Address(0x20));
    history.process_match_event(&event, &graph);

    assert!(events.borrow().is_empty());
}

#[test]
fn test_combined_patch_add_then_remove_round_trips() {
    let mut graph = combined_split();
    let unmatched_primary = graph.node_on_side(Side::Primary, Address(0x10)).unwrap();
    let unmatched_secondary = graph.node_on_side(Side::Secondary, Address(0x20)).unwrap();
    let mut history = SelectionHistory::new(&graph, 10);

    graph.select_nodes(&[unmatched_primary, unmatched_secondary], &[]);
    history.record(&graph);
    let original: Vec<_> = history.snapshot(1).unwrap().elements().to_vec();

    // User adds the match; the combined view is rebuilt with a merged node.
    let merged = combined_merged();
    let event = MatchEvent::added(function_pair(), Address(0x10), Address(0x20));
    history.process_match_event(&event, &merged);

    let matched_key = ElementKey::Node(NodeKey::Combined {
        primary: Some(Address(0x10)),
        secondary: Some(Address(0x20)),
    });
    assert_eq!(history.snapshot(1).unwrap().elements(), &[matched_key]);

    // User removes it again; the view splits back apart.
    let mut split = combined_split();
    let event = MatchEvent::removed(function_pair(), Address(0x10), Address(0x20));
    history.process_match_event(&event, &split);

    let mut restored: Vec<_> = history.snapshot(1).unwrap().elements().to_vec();
    restored.sort_by_key(|k| k.anchor());
    let mut expected = original.clone();
    expected.sort_by_key(|k| k.anchor());
    assert_eq!(restored, expected);

    // Undo replays the logically equivalent pre-match selection.
    history.undo(&mut split);
    history.redo(&mut split);
    assert_eq!(split.selected_nodes().len(), 2);
}

#[test]
fn test_snapshot_mutation_events() {
    let mut snapshot = SelectionSnapshot::empty();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    snapshot.subscribe(move |event| sink.borrow_mut().push(*event));

    let key = ElementKey::Node(NodeKey::Single {
        side: Side::Primary,
        address: Address(0x10),
    });
    snapshot.add_element(key);
    snapshot.add_element(key); // duplicate, ignored
    snapshot.remove_element(&key);
    snapshot.finish_modification();

    assert_eq!(
        events.borrow().as_slice(),
        &[
            SnapshotEvent::AddedElement(key),
            SnapshotEvent::RemovedElement(key),
            SnapshotEvent::Finished,
        ]
    );
}

#[test]
fn test_snapshot_descriptions() {
    let mut graph = combined_split();
    let id = graph.node_on_side(Side::Primary, Address(0x10)).unwrap();

    let empty = SelectionSnapshot::capture(&graph);
    assert_eq!(empty.description(), "No selection");

    graph.select_nodes(&[id], &[]);
    let single = SelectionSnapshot::capture(&graph);
    assert_eq!(single.description(), "00000010");

    let other = graph.node_on_side(Side::Secondary, Address(0x20)).unwrap();
    graph.select_nodes(&[other], &[]);
    let group = SelectionSnapshot::capture(&graph);
    assert_eq!(group.description(), "Group selection");
}

#[test]
fn test_dispose_detaches_listeners() {
    let graph = primary_graph_with_blocks(&[0x10]);
    let mut history = SelectionHistory::new(&graph, 10);
    let events = collect_events(&mut history);

    history.dispose();
    history.record(&graph);

    assert!(events.borrow().is_empty());
    assert_eq!(history.snapshot_count(), 1);
}
