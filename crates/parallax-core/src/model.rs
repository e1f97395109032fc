//! Core data structures for the diff view graphs

use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Raw anchoring address of a function or basic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Address(pub u64);

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Which of the two compared binaries an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Primary,
    Secondary,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Primary => Side::Secondary,
            Side::Secondary => Side::Primary,
        }
    }
}

/// Stable per-graph node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Stable per-graph edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Which of the four linked views a graph renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    Single(Side),
    Combined,
    Super,
}

/// The primary/secondary function pair a flow-graph view displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionMatch {
    pub primary: Address,
    pub secondary: Address,
}

/// What a view node represents, tagged by view variant.
///
/// A combined node correlates a primary-side and/or secondary-side raw node
/// via a match; at least one side is always present. A super node mirrors its
/// combined node's sides so the two single layouts stay positionally
/// synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeData {
    Single {
        side: Side,
        address: Address,
    },
    Combined {
        primary: Option<Address>,
        secondary: Option<Address>,
    },
    Super {
        primary: Option<Address>,
        secondary: Option<Address>,
    },
}

impl NodeData {
    pub fn single(side: Side, address: Address) -> Self {
        NodeData::Single { side, address }
    }

    /// Build a combined node. Panics on `(None, None)`: a combined node with
    /// neither side is an invariant violation, not a representable state.
    pub fn combined(primary: Option<Address>, secondary: Option<Address>) -> Self {
        assert!(
            primary.is_some() || secondary.is_some(),
            "combined node requires at least one side"
        );
        NodeData::Combined { primary, secondary }
    }

    /// Build a super node mirroring the given combined node's sides.
    pub fn super_of(combined: &NodeData) -> Self {
        match *combined {
            NodeData::Combined { primary, secondary } => NodeData::Super { primary, secondary },
            _ => panic!("super node must mirror a combined node"),
        }
    }

    /// The raw anchoring address used for ordering and identity correlation.
    /// Combined/super nodes anchor on their primary side, falling back to the
    /// secondary side for unmatched secondary-only nodes.
    pub fn anchor(&self) -> Address {
        match *self {
            NodeData::Single { address, .. } => address,
            NodeData::Combined { primary, secondary }
            | NodeData::Super { primary, secondary } => primary
                .or(secondary)
                .unwrap_or_else(|| panic!("node without an anchoring address: {self:?}")),
        }
    }

    /// The constituent address on the requested side, if present.
    pub fn side_address(&self, side: Side) -> Option<Address> {
        match (*self, side) {
            (NodeData::Single { side: s, address }, _) if s == side => Some(address),
            (NodeData::Single { .. }, _) => None,
            (NodeData::Combined { primary, .. }, Side::Primary)
            | (NodeData::Super { primary, .. }, Side::Primary) => primary,
            (NodeData::Combined { secondary, .. }, Side::Secondary)
            | (NodeData::Super { secondary, .. }, Side::Secondary) => secondary,
        }
    }

    /// Address-derived identity, stable across graph rebuilds. Super nodes
    /// share their combined node's key.
    pub fn key(&self) -> NodeKey {
        match *self {
            NodeData::Single { side, address } => NodeKey::Single { side, address },
            NodeData::Combined { primary, secondary }
            | NodeData::Super { primary, secondary } => NodeKey::Combined { primary, secondary },
        }
    }
}

/// What a view edge represents. Single edges are identified by their side and
/// endpoint addresses; combined/super edges by optional per-side endpoint
/// pairs (at least one present).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeData {
    Single {
        side: Side,
        source: Address,
        target: Address,
    },
    Combined {
        primary: Option<(Address, Address)>,
        secondary: Option<(Address, Address)>,
    },
    Super {
        primary: Option<(Address, Address)>,
        secondary: Option<(Address, Address)>,
    },
}

impl EdgeData {
    pub fn single(side: Side, source: Address, target: Address) -> Self {
        EdgeData::Single { side, source, target }
    }

    pub fn combined(
        primary: Option<(Address, Address)>,
        secondary: Option<(Address, Address)>,
    ) -> Self {
        assert!(
            primary.is_some() || secondary.is_some(),
            "combined edge requires at least one side"
        );
        EdgeData::Combined { primary, secondary }
    }

    pub fn super_of(combined: &EdgeData) -> Self {
        match *combined {
            EdgeData::Combined { primary, secondary } => EdgeData::Super { primary, secondary },
            _ => panic!("super edge must mirror a combined edge"),
        }
    }

    /// Anchoring address: the source endpoint, primary side first.
    pub fn anchor(&self) -> Address {
        match *self {
            EdgeData::Single { source, .. } => source,
            EdgeData::Combined { primary, secondary }
            | EdgeData::Super { primary, secondary } => primary
                .or(secondary)
                .map(|(source, _)| source)
                .unwrap_or_else(|| panic!("edge without an anchoring address: {self:?}")),
        }
    }

    /// The constituent endpoint pair on the requested side, if present.
    pub fn side_endpoints(&self, side: Side) -> Option<(Address, Address)> {
        match (*self, side) {
            (EdgeData::Single { side: s, source, target }, _) if s == side => {
                Some((source, target))
            }
            (EdgeData::Single { .. }, _) => None,
            (EdgeData::Combined { primary, .. }, Side::Primary)
            | (EdgeData::Super { primary, .. }, Side::Primary) => primary,
            (EdgeData::Combined { secondary, .. }, Side::Secondary)
            | (EdgeData::Super { secondary, .. }, Side::Secondary) => secondary,
        }
    }

    pub fn key(&self) -> EdgeKey {
        match *self {
            EdgeData::Single { side, source, target } => EdgeKey::Single { side, source, target },
            EdgeData::Combined { primary, secondary }
            | EdgeData::Super { primary, secondary } => EdgeKey::Combined { primary, secondary },
        }
    }
}

/// Address-derived node identity. Node objects are rebuilt, not mutated, when
/// the match set changes; anything that outlives a rebuild (selection
/// snapshots) keys nodes by this instead of by `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    Single {
        side: Side,
        address: Address,
    },
    Combined {
        primary: Option<Address>,
        secondary: Option<Address>,
    },
}

impl NodeKey {
    pub fn anchor(&self) -> Address {
        match *self {
            NodeKey::Single { address, .. } => address,
            NodeKey::Combined { primary, secondary } => primary
                .or(secondary)
                .unwrap_or_else(|| panic!("node key without an anchoring address")),
        }
    }
}

/// Address-derived edge identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKey {
    Single {
        side: Side,
        source: Address,
        target: Address,
    },
    Combined {
        primary: Option<(Address, Address)>,
        secondary: Option<(Address, Address)>,
    },
}

impl EdgeKey {
    pub fn anchor(&self) -> Address {
        match *self {
            EdgeKey::Single { source, .. } => source,
            EdgeKey::Combined { primary, secondary } => primary
                .or(secondary)
                .map(|(source, _)| source)
                .unwrap_or_else(|| panic!("edge key without an anchoring address")),
        }
    }
}

/// A selectable view element, as stored in selection snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKey {
    Node(NodeKey),
    Edge(EdgeKey),
}

impl ElementKey {
    pub fn anchor(&self) -> Address {
        match self {
            ElementKey::Node(key) => key.anchor(),
            ElementKey::Edge(key) => key.anchor(),
        }
    }
}

/// A node in one of the four view graphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewNode {
    pub id: NodeId,
    pub data: NodeData,
    pub label: Label,
    pub selected: bool,
    pub visible: bool,
}

/// An edge in one of the four view graphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewEdge {
    pub id: EdgeId,
    pub data: EdgeData,
    pub label: Option<Label>,
    pub selected: bool,
    pub visible: bool,
}
