//! Bounded undo/redo history of selection snapshots

use crate::snapshot::SelectionSnapshot;
use parallax_core::{
    ElementKey, FunctionMatch, GraphKind, Listeners, ListenerId, NodeId, ViewGraph,
};

/// History transition notifications for browser-style observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    SnapshotAdded(usize),
    SnapshotRemoved(usize),
    StartedUndo,
    FinishedUndo,
    StartedRedo,
    FinishedRedo,
}

/// Default number of snapshots retained per view.
pub const DEFAULT_CAPACITY: usize = 30;

/// Capacity-bounded FIFO of selection snapshots for one view, with a clamped
/// undo cursor. Attaches to a single-side graph or the combined graph, never
/// the super graph.
///
/// Unlike the searcher's cyclic cursor, `undo`/`redo` clamp at the ends
/// instead of wrapping. The `enabled` freeze flag is what keeps replaying a
/// snapshot from recording itself as a new snapshot.
pub struct SelectionHistory {
    kind: GraphKind,
    function_match: FunctionMatch,
    capacity: usize,
    snapshots: Vec<SelectionSnapshot>,
    undo_index: usize,
    enabled: bool,
    listeners: Listeners<HistoryEvent>,
}

impl std::fmt::Debug for SelectionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionHistory")
            .field("kind", &self.kind)
            .field("snapshots", &self.snapshots.len())
            .field("undo_index", &self.undo_index)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl SelectionHistory {
    /// Attach a history to the given view. Panics on the super graph: it has
    /// no history of its own, its selection follows the combined graph.
    pub fn new(graph: &ViewGraph, capacity: usize) -> Self {
        assert!(
            !matches!(graph.kind(), GraphKind::Super),
            "the super graph has no selection history"
        );
        assert!(capacity > 0, "history capacity must be positive");
        SelectionHistory {
            kind: graph.kind(),
            function_match: graph.function_match(),
            capacity,
            snapshots: vec![SelectionSnapshot::empty()],
            undo_index: 0,
            enabled: true,
            listeners: Listeners::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn function_match(&self) -> FunctionMatch {
        self.function_match
    }

    /// Capture and record the graph's current selection.
    pub fn record(&mut self, graph: &ViewGraph) {
        self.add_snapshot(SelectionSnapshot::capture(graph));
    }

    /// Append a snapshot. A no-op while frozen. Past capacity the oldest
    /// snapshot (index 0) is evicted, regardless of where the undo cursor
    /// sits.
    pub fn add_snapshot(&mut self, snapshot: SelectionSnapshot) {
        if !self.enabled {
            return;
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
            self.listeners.notify(&HistoryEvent::SnapshotRemoved(0));
        }
        self.undo_index = self.snapshots.len() - 1;
        self.listeners.notify(&HistoryEvent::SnapshotAdded(self.undo_index));
    }

    /// Step back one snapshot and replay it onto the graph. Clamps at index
    /// 0: no wraparound.
    pub fn undo(&mut self, graph: &mut ViewGraph) {
        self.listeners.notify(&HistoryEvent::StartedUndo);
        self.undo_index = self.undo_index.saturating_sub(1);
        self.apply_current(graph);
        self.listeners.notify(&HistoryEvent::FinishedUndo);
    }

    /// Step forward one snapshot and replay it onto the graph. Clamps at the
    /// last index.
    pub fn redo(&mut self, graph: &mut ViewGraph) {
        self.listeners.notify(&HistoryEvent::StartedRedo);
        if self.undo_index + 1 < self.snapshots.len() {
            self.undo_index += 1;
        }
        self.apply_current(graph);
        self.listeners.notify(&HistoryEvent::FinishedRedo);
    }

    /// Deselect everything currently selected, then select exactly the
    /// elements of the snapshot under the cursor. Recording is frozen for the
    /// duration so the replay does not enqueue itself.
    fn apply_current(&mut self, graph: &mut ViewGraph) {
        let was_enabled = self.enabled;
        self.enabled = false;

        let mut to_select: Vec<NodeId> = Vec::new();
        let mut edges_to_select = Vec::new();
        for key in self.snapshots[self.undo_index].elements() {
            match key {
                ElementKey::Node(node_key) => match graph.node_by_key(node_key) {
                    Some(id) => to_select.push(id),
                    None => tracing::warn!(?node_key, "snapshot node not present in graph"),
                },
                ElementKey::Edge(edge_key) => match graph.edge_by_key(edge_key) {
                    Some(id) => edges_to_select.push(id),
                    None => tracing::warn!(?edge_key, "snapshot edge not present in graph"),
                },
            }
        }

        let to_unselect = graph.selected_nodes();
        graph.select_nodes(&to_select, &to_unselect);
        for id in graph.selected_edges() {
            graph.set_edge_selected(id, false);
        }
        for id in edges_to_select {
            graph.set_edge_selected(id, true);
        }

        self.enabled = was_enabled;
    }

    /// Freeze or unfreeze recording. While frozen, `add_snapshot` and
    /// `record` are no-ops.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn undo_index(&self) -> usize {
        self.undo_index
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshot(&self, index: usize) -> Option<&SelectionSnapshot> {
        self.snapshots.get(index)
    }

    /// Mutable snapshot access, for observers that attach per-snapshot
    /// listeners.
    pub fn snapshot_mut(&mut self, index: usize) -> Option<&mut SelectionSnapshot> {
        self.snapshots.get_mut(index)
    }

    pub(crate) fn snapshots_mut(&mut self) -> &mut [SelectionSnapshot] {
        &mut self.snapshots
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&HistoryEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    /// Detach every listener (history and per-snapshot) and stop recording.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        for snapshot in &mut self.snapshots {
            snapshot.clear_listeners();
        }
        self.enabled = false;
    }
}
