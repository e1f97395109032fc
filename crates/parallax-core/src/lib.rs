//! Parallax Core — Data model for the four linked diff views
//!
//! One logical binary-diff graph rendered four ways: primary-only,
//! secondary-only, combined (matched pairs), and super (keeps the two single
//! layouts positionally synchronized). Node/edge identity across match edits
//! is derived from raw addresses, never from object references.

pub mod graph;
pub mod label;
pub mod listener;
pub mod matches;
pub mod model;


pub use graph::ViewGraph;
pub use label::{Color, Label, LabelLine, StyleRun};
pub use listener::{ListenerId, Listeners};
pub use matches::{MatchEvent, MatchEventKind};
pub use model::{
    Address, EdgeData, EdgeId, EdgeKey, ElementKey, FunctionMatch, GraphKind, NodeData, NodeId,
    NodeKey, Side, ViewEdge, ViewNode,
};
