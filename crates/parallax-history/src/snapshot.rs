//! Point-in-time selection snapshots
//!
//! A snapshot records which elements were selected, keyed by address-derived
//! identity so it survives graph rebuilds. Snapshots stay mutable after
//! creation: match-driven patching re-keys their contents in place, and a
//! tree-style history browser observes every mutation through the listener
//! hooks.

use parallax_core::{ElementKey, Listeners, ListenerId, ViewGraph};

/// Fine-grained snapshot mutation notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotEvent {
    AddedElement(ElementKey),
    RemovedElement(ElementKey),
    /// A patching pass over this snapshot completed.
    Finished,
}

/// An ordered, duplicate-free selection set captured at a point in time.
pub struct SelectionSnapshot {
    elements: Vec<ElementKey>,
    listeners: Listeners<SnapshotEvent>,
}

impl std::fmt::Debug for SelectionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSnapshot")
            .field("elements", &self.elements)
            .finish()
    }
}

impl SelectionSnapshot {
    pub fn empty() -> Self {
        SelectionSnapshot {
            elements: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Capture the graph's current selection, nodes before edges, in graph
    /// order.
    pub fn capture(graph: &ViewGraph) -> Self {
        let mut elements = Vec::new();
        for id in graph.selected_nodes() {
            if let Some(node) = graph.node(id) {
                elements.push(ElementKey::Node(node.data.key()));
            }
        }
        for id in graph.selected_edges() {
            if let Some(edge) = graph.edge(id) {
                elements.push(ElementKey::Edge(edge.data.key()));
            }
        }
        SelectionSnapshot {
            elements,
            listeners: Listeners::new(),
        }
    }

    pub fn elements(&self) -> &[ElementKey] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.elements.contains(key)
    }

    /// Add an element post-creation (live patching). Duplicate keys are
    /// ignored.
    pub fn add_element(&mut self, key: ElementKey) {
        if self.contains(&key) {
            return;
        }
        self.elements.push(key);
        self.listeners.notify(&SnapshotEvent::AddedElement(key));
    }

    /// Remove an element post-creation.
    pub fn remove_element(&mut self, key: &ElementKey) {
        let before = self.elements.len();
        self.elements.retain(|e| e != key);
        if self.elements.len() != before {
            self.listeners.notify(&SnapshotEvent::RemovedElement(*key));
        }
    }

    /// Announce that a patching pass over this snapshot completed.
    pub fn finish_modification(&mut self) {
        self.listeners.notify(&SnapshotEvent::Finished);
    }

    /// Human-readable description derived from the selection content.
    pub fn description(&self) -> String {
        match self.elements.as_slice() {
            [] => "No selection".to_string(),
            [only] => only.anchor().to_string(),
            _ => "Group selection".to_string(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SnapshotEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    pub(crate) fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}
