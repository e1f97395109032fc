//! Search result value objects

use parallax_core::{Color, EdgeId, NodeId, StyleRun};
use serde::{Deserialize, Serialize};

/// The view element a search result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultObject {
    Node(NodeId),
    Edge(EdgeId),
}

/// One sub-object match within a label: its position, the matched line text,
/// and a snapshot of the line's pre-existing style runs plus the owning
/// object's border color, so unhighlighting restores the exact prior
/// appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub object: ResultObject,
    pub line: usize,
    pub start: usize,
    pub length: usize,
    pub line_text: String,
    pub saved_runs: Vec<StyleRun>,
    pub saved_border: Color,
}
