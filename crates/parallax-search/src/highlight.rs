//! Result highlighting: apply and bit-exact restore of label styles

use crate::result::{ResultObject, SearchResult};
use parallax_core::{Color, GraphKind, LabelLine, NodeId, Side, StyleRun, ViewGraph};

/// Highlight colors for the two sides plus the mixed-border indicator shown
/// on a combined node whose constituents currently differ in color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColors {
    pub primary: Color,
    pub secondary: Color,
    pub mixed: Color,
}

impl Default for HighlightColors {
    fn default() -> Self {
        HighlightColors {
            primary: Color(0xFFF200),
            secondary: Color(0x00C0F0),
            mixed: Color(0xC050F0),
        }
    }
}

/// Recolor each matched span and the owning object's border. The results'
/// saved style snapshots are untouched, so [`remove_highlighting`] can
/// restore the exact prior appearance.
pub fn highlight_results(graph: &mut ViewGraph, results: &[SearchResult], color: Color) {
    for result in results {
        let run = StyleRun {
            start: result.start,
            length: result.length,
            color,
        };
        match result.object {
            ResultObject::Node(id) => {
                if let Some(node) = graph.node_mut(id) {
                    if let Some(line) = node.label.line_mut(result.line) {
                        splice_run(line, run);
                    }
                    node.label.border_color = color;
                }
            }
            ResultObject::Edge(id) => {
                if let Some(label) = graph.edge_mut(id).and_then(|e| e.label.as_mut()) {
                    if let Some(line) = label.line_mut(result.line) {
                        splice_run(line, run);
                    }
                    label.border_color = color;
                }
            }
        }
    }
}

/// Insert a run into a line's run list, trimming existing runs where they
/// overlap the new span. Runs outside the span, including the untouched parts
/// of partially overlapped runs, keep their colors, so two results on one
/// line highlight both spans.
fn splice_run(line: &mut LabelLine, run: StyleRun) {
    let start = run.start;
    let end = run.start + run.length;
    let mut runs = Vec::with_capacity(line.runs.len() + 1);
    for existing in line.runs.drain(..) {
        let existing_end = existing.start + existing.length;
        if existing_end <= start || existing.start >= end {
            runs.push(existing);
            continue;
        }
        if existing.start < start {
            runs.push(StyleRun {
                start: existing.start,
                length: start - existing.start,
                color: existing.color,
            });
        }
        if existing_end > end {
            runs.push(StyleRun {
                start: end,
                length: existing_end - end,
                color: existing.color,
            });
        }
    }
    runs.push(run);
    runs.sort_by_key(|r| r.start);
    line.runs = runs;
}

/// Restore the style runs and border color captured when the results were
/// produced.
pub fn remove_highlighting(graph: &mut ViewGraph, results: &[SearchResult]) {
    for result in results {
        match result.object {
            ResultObject::Node(id) => {
                if let Some(node) = graph.node_mut(id) {
                    if let Some(line) = node.label.line_mut(result.line) {
                        line.runs = result.saved_runs.clone();
                    }
                    node.label.border_color = result.saved_border;
                }
            }
            ResultObject::Edge(id) => {
                if let Some(label) = graph.edge_mut(id).and_then(|e| e.label.as_mut()) {
                    if let Some(line) = label.line_mut(result.line) {
                        line.runs = result.saved_runs.clone();
                    }
                    label.border_color = result.saved_border;
                }
            }
        }
    }
}

/// Recolor combined-node borders: a node whose primary and secondary
/// constituents currently carry different border colors in their single-side
/// graphs gets the mixed indicator. Returns each recolored node's prior
/// border so [`restore_borders`] can undo the recolor exactly.
pub fn recolor_combined(
    combined: &mut ViewGraph,
    primary_graph: &ViewGraph,
    secondary_graph: &ViewGraph,
    colors: &HighlightColors,
) -> Vec<(NodeId, Color)> {
    debug_assert_eq!(combined.kind(), GraphKind::Combined);

    let mut mixed = Vec::new();
    for node in combined.all_nodes() {
        let primary_color = node
            .data
            .side_address(Side::Primary)
            .and_then(|a| primary_graph.node_on_side(Side::Primary, a))
            .and_then(|id| primary_graph.node(id))
            .map(|n| n.label.border_color);
        let secondary_color = node
            .data
            .side_address(Side::Secondary)
            .and_then(|a| secondary_graph.node_on_side(Side::Secondary, a))
            .and_then(|id| secondary_graph.node(id))
            .map(|n| n.label.border_color);
        if let (Some(p), Some(s)) = (primary_color, secondary_color) {
            if p != s {
                mixed.push(node.id);
            }
        }
    }
    let mut saved = Vec::with_capacity(mixed.len());
    for id in mixed {
        if let Some(node) = combined.node_mut(id) {
            saved.push((id, node.label.border_color));
            node.label.border_color = colors.mixed;
        }
    }
    saved
}

/// Put back the border colors captured by [`recolor_combined`].
pub fn restore_borders(graph: &mut ViewGraph, saved: &[(NodeId, Color)]) {
    for &(id, color) in saved {
        if let Some(node) = graph.node_mut(id) {
            node.label.border_color = color;
        }
    }
}
