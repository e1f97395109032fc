//! Match-driven re-keying of stored snapshots
//!
//! Node objects are not identity-stable across match edits: the caller
//! rebuilds the affected view graphs, and every snapshot still holding the
//! old identities must be re-keyed by address. Adding a basic-block match
//! merges two unmatched combined nodes into one matched pair; removing it
//! splits them again.

use crate::history::SelectionHistory;
use parallax_core::{
    Address, ElementKey, GraphKind, MatchEvent, MatchEventKind, NodeKey, Side, ViewGraph,
};

impl SelectionHistory {
    /// React to a basic-block match edit. `graph` is the freshly rebuilt view
    /// this history is attached to. Events for other function pairs are
    /// ignored.
    pub fn process_match_event(&mut self, event: &MatchEvent, graph: &ViewGraph) {
        if event.function != self.function_match() {
            return;
        }
        match self.kind() {
            GraphKind::Single(side) => self.patch_single(side, event, graph),
            GraphKind::Combined => self.patch_combined(event, graph),
            GraphKind::Super => unreachable!("no history is attached to the super graph"),
        }
    }

    /// Single-side keys are derived from side and address, so they survive
    /// the rebuild unchanged; touched snapshots are re-validated against the
    /// new graph and notified.
    fn patch_single(&mut self, side: Side, event: &MatchEvent, graph: &ViewGraph) {
        let address = match side {
            Side::Primary => event.primary_block,
            Side::Secondary => event.secondary_block,
        };
        let key = NodeKey::Single { side, address };
        if graph.node_by_key(&key).is_none() {
            tracing::warn!(?key, "rebuilt graph is missing the edited block");
        }
        let element = ElementKey::Node(key);
        for snapshot in self.snapshots_mut() {
            if snapshot.contains(&element) {
                snapshot.finish_modification();
            }
        }
    }

    fn patch_combined(&mut self, event: &MatchEvent, graph: &ViewGraph) {
        let unmatched_primary = ElementKey::Node(NodeKey::Combined {
            primary: Some(event.primary_block),
            secondary: None,
        });
        let unmatched_secondary = ElementKey::Node(NodeKey::Combined {
            primary: None,
            secondary: Some(event.secondary_block),
        });
        let matched = ElementKey::Node(NodeKey::Combined {
            primary: Some(event.primary_block),
            secondary: Some(event.secondary_block),
        });

        match event.kind {
            MatchEventKind::Added => {
                // The merged node is anchored at both block addresses; locate
                // it through either side.
                let Some(new_key) = lookup_key(graph, Side::Primary, event.primary_block)
                    .or_else(|| lookup_key(graph, Side::Secondary, event.secondary_block))
                else {
                    tracing::warn!(?event, "rebuilt combined graph is missing the merged node");
                    return;
                };
                self.replace_in_snapshots(&[unmatched_primary, unmatched_secondary], &[new_key]);
            }
            MatchEventKind::Removed => {
                let mut split = Vec::new();
                if let Some(key) = lookup_key(graph, Side::Primary, event.primary_block) {
                    split.push(key);
                }
                if let Some(key) = lookup_key(graph, Side::Secondary, event.secondary_block) {
                    split.push(key);
                }
                if split.is_empty() {
                    tracing::warn!(?event, "rebuilt combined graph is missing the split nodes");
                    return;
                }
                self.replace_in_snapshots(&[matched], &split);
            }
        }
    }

    fn replace_in_snapshots(&mut self, old: &[ElementKey], new: &[ElementKey]) {
        for snapshot in self.snapshots_mut() {
            let mut modified = false;
            for key in old {
                if snapshot.contains(key) {
                    snapshot.remove_element(key);
                    modified = true;
                }
            }
            if modified {
                for key in new {
                    snapshot.add_element(*key);
                }
                snapshot.finish_modification();
            }
        }
    }
}

fn lookup_key(graph: &ViewGraph, side: Side, address: Address) -> Option<ElementKey> {
    graph
        .node_on_side(side, address)
        .and_then(|id| graph.node(id))
        .map(|n| ElementKey::Node(n.data.key()))
}
