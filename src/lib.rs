//! Parallax — binary-diff graph view engine
//!
//! One logical diff graph rendered through four linked views: primary-only,
//! secondary-only, combined (matched pairs), and super (keeps the two single
//! layouts positionally synchronized). This facade crate wires the per-view
//! searchers and selection histories into a [`DiffSession`] and keeps them
//! consistent while the match set is edited live.
//!
//! Graph layout, rendering, configuration, and the matching algorithm itself
//! are collaborators outside this engine; only their edit events are
//! consumed.

mod session;

pub use parallax_core::{
    Address, Color, EdgeData, EdgeId, EdgeKey, ElementKey, FunctionMatch, GraphKind, Label,
    LabelLine, ListenerId, Listeners, MatchEvent, MatchEventKind, NodeData, NodeId, NodeKey, Side,
    StyleRun, ViewEdge, ViewGraph, ViewNode,
};
pub use parallax_history::{
    HistoryEvent, SelectionHistory, SelectionSnapshot, SnapshotEvent, DEFAULT_CAPACITY,
};
pub use parallax_search::{
    GraphSearcher, HighlightColors, ResultObject, SearchError, SearchQuery, SearchResult,
};
pub use session::{DiffGraphs, DiffSession, JumpOutcome, WrapDirection};
