//! View graph wrapper using petgraph::StableDiGraph with custom NodeId/EdgeId

use crate::label::Label;
use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};

/// One of the four linked views over the diffed function pair: a directed
/// graph with stable node/edge indices, plus selection and visibility state.
pub struct ViewGraph {
    kind: GraphKind,
    function_match: FunctionMatch,
    inner: StableDiGraph<ViewNode, ViewEdge>,
}

impl std::fmt::Debug for ViewGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewGraph")
            .field("kind", &self.kind)
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl ViewGraph {
    pub fn new(kind: GraphKind, function_match: FunctionMatch) -> Self {
        ViewGraph {
            kind,
            function_match,
            inner: StableDiGraph::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// The primary/secondary function pair this view displays.
    pub fn function_match(&self) -> FunctionMatch {
        self.function_match
    }

    /// Add a node to the graph. Returns the assigned NodeId.
    pub fn add_node(&mut self, data: NodeData, label: Label) -> NodeId {
        let node = ViewNode {
            id: NodeId(0),
            data,
            label,
            selected: false,
            visible: true,
        };
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        self.inner[idx].id = id;
        id
    }

    /// Add an edge between two nodes. Returns the assigned EdgeId.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, data: EdgeData) -> EdgeId {
        let edge = ViewEdge {
            id: EdgeId(0),
            data,
            label: None,
            selected: false,
            visible: true,
        };
        let idx = self.inner.add_edge(
            NodeIndex::new(source.0 as usize),
            NodeIndex::new(target.0 as usize),
            edge,
        );
        let id = EdgeId(idx.index() as u64);
        self.inner[idx].id = id;
        id
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&ViewNode> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ViewNode> {
        self.inner.node_weight_mut(NodeIndex::new(id.0 as usize))
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&ViewEdge> {
        self.inner.edge_weight(EdgeIndex::new(id.0 as usize))
    }

    /// Get a mutable edge by ID.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut ViewEdge> {
        self.inner.edge_weight_mut(EdgeIndex::new(id.0 as usize))
    }

    /// Source and target node IDs of an edge.
    pub fn edge_endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        self.inner
            .edge_endpoints(EdgeIndex::new(id.0 as usize))
            .map(|(s, t)| (NodeId(s.index() as u64), NodeId(t.index() as u64)))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes.
    pub fn all_nodes(&self) -> impl Iterator<Item = &ViewNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &ViewEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Find the node whose constituent on the given side sits at `address`.
    pub fn node_on_side(&self, side: Side, address: Address) -> Option<NodeId> {
        self.all_nodes()
            .find(|n| n.data.side_address(side) == Some(address))
            .map(|n| n.id)
    }

    /// Find a node by its address-derived key.
    pub fn node_by_key(&self, key: &NodeKey) -> Option<NodeId> {
        self.all_nodes().find(|n| n.data.key() == *key).map(|n| n.id)
    }

    /// Find an edge by its address-derived key.
    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<EdgeId> {
        self.all_edges().find(|e| e.data.key() == *key).map(|e| e.id)
    }

    /// IDs of the currently selected nodes, in graph order.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.all_nodes().filter(|n| n.selected).map(|n| n.id).collect()
    }

    /// IDs of the currently selected edges, in graph order.
    pub fn selected_edges(&self) -> Vec<EdgeId> {
        self.all_edges().filter(|e| e.selected).map(|e| e.id).collect()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.node(id).map(|n| n.selected).unwrap_or(false)
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).map(|n| n.visible).unwrap_or(false)
    }

    /// Bulk selection mutator: unselect first, then select.
    pub fn select_nodes(&mut self, to_select: &[NodeId], to_unselect: &[NodeId]) {
        for &id in to_unselect {
            if let Some(node) = self.node_mut(id) {
                node.selected = false;
            }
        }
        for &id in to_select {
            if let Some(node) = self.node_mut(id) {
                node.selected = true;
            }
        }
    }

    pub fn set_edge_selected(&mut self, id: EdgeId, selected: bool) {
        if let Some(edge) = self.edge_mut(id) {
            edge.selected = selected;
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }
}
