//! Cross-graph orchestration over the four linked views

use anyhow::{Context, Result};
use parallax_core::{Color, GraphKind, MatchEvent, NodeId, Side, ViewGraph};
use parallax_history::{SelectionHistory, DEFAULT_CAPACITY};
use parallax_search::{
    highlight_results, recolor_combined, remove_highlighting, restore_borders, GraphSearcher,
    HighlightColors, ResultObject, SearchQuery,
};

/// The four linked views over one diffed function pair. Built by the graph
/// construction layer (outside this engine) and handed in whole.
pub struct DiffGraphs {
    pub primary: ViewGraph,
    pub secondary: ViewGraph,
    pub combined: ViewGraph,
    pub super_graph: ViewGraph,
}

impl DiffGraphs {
    pub fn new(
        primary: ViewGraph,
        secondary: ViewGraph,
        combined: ViewGraph,
        super_graph: ViewGraph,
    ) -> Self {
        assert_eq!(primary.kind(), GraphKind::Single(Side::Primary));
        assert_eq!(secondary.kind(), GraphKind::Single(Side::Secondary));
        assert_eq!(combined.kind(), GraphKind::Combined);
        assert_eq!(super_graph.kind(), GraphKind::Super);
        DiffGraphs {
            primary,
            secondary,
            combined,
            super_graph,
        }
    }

    pub fn get(&self, kind: GraphKind) -> &ViewGraph {
        match kind {
            GraphKind::Single(Side::Primary) => &self.primary,
            GraphKind::Single(Side::Secondary) => &self.secondary,
            GraphKind::Combined => &self.combined,
            GraphKind::Super => &self.super_graph,
        }
    }

    pub fn get_mut(&mut self, kind: GraphKind) -> &mut ViewGraph {
        match kind {
            GraphKind::Single(Side::Primary) => &mut self.primary,
            GraphKind::Single(Side::Secondary) => &mut self.secondary,
            GraphKind::Combined => &mut self.combined,
            GraphKind::Super => &mut self.super_graph,
        }
    }
}

/// Which end the result cursor wrapped past during iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapDirection {
    PastEnd,
    PastStart,
}

impl WrapDirection {
    /// User-facing notice text.
    pub fn message(self) -> &'static str {
        match self {
            WrapDirection::PastEnd => "Search reached the last result and wrapped around",
            WrapDirection::PastStart => "Search reached the first result and wrapped around",
        }
    }
}

/// Where the camera should move after a result iteration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpOutcome {
    pub graph: GraphKind,
    pub node: NodeId,
    pub zoom: bool,
    pub wrapped: Option<WrapDirection>,
}

struct Searchers {
    primary: GraphSearcher,
    secondary: GraphSearcher,
    combined: GraphSearcher,
    super_graph: GraphSearcher,
}

struct Histories {
    primary: SelectionHistory,
    secondary: SelectionHistory,
    combined: SelectionHistory,
}

/// One diff-view session: the four graphs plus their search and selection
/// state. Everything runs synchronously on the caller's thread.
pub struct DiffSession {
    graphs: DiffGraphs,
    searchers: Searchers,
    histories: Histories,
    colors: HighlightColors,
    mixed_borders: Vec<(NodeId, Color)>,
}

impl DiffSession {
    pub fn new(graphs: DiffGraphs) -> Self {
        let histories = Histories {
            primary: SelectionHistory::new(&graphs.primary, DEFAULT_CAPACITY),
            secondary: SelectionHistory::new(&graphs.secondary, DEFAULT_CAPACITY),
            combined: SelectionHistory::new(&graphs.combined, DEFAULT_CAPACITY),
        };
        DiffSession {
            graphs,
            searchers: Searchers {
                primary: GraphSearcher::new(),
                secondary: GraphSearcher::new(),
                combined: GraphSearcher::new(),
                super_graph: GraphSearcher::new(),
            },
            histories,
            colors: HighlightColors::default(),
            mixed_borders: Vec::new(),
        }
    }

    pub fn graphs(&self) -> &DiffGraphs {
        &self.graphs
    }

    pub fn graphs_mut(&mut self) -> &mut DiffGraphs {
        &mut self.graphs
    }

    pub fn searcher(&self, kind: GraphKind) -> &GraphSearcher {
        match kind {
            GraphKind::Single(Side::Primary) => &self.searchers.primary,
            GraphKind::Single(Side::Secondary) => &self.searchers.secondary,
            GraphKind::Combined => &self.searchers.combined,
            GraphKind::Super => &self.searchers.super_graph,
        }
    }

    pub fn history(&self, kind: GraphKind) -> Option<&SelectionHistory> {
        match kind {
            GraphKind::Single(Side::Primary) => Some(&self.histories.primary),
            GraphKind::Single(Side::Secondary) => Some(&self.histories.secondary),
            GraphKind::Combined => Some(&self.histories.combined),
            GraphKind::Super => None,
        }
    }

    pub fn history_mut(&mut self, kind: GraphKind) -> Option<&mut SelectionHistory> {
        match kind {
            GraphKind::Single(Side::Primary) => Some(&mut self.histories.primary),
            GraphKind::Single(Side::Secondary) => Some(&mut self.histories.secondary),
            GraphKind::Combined => Some(&mut self.histories.combined),
            GraphKind::Super => None,
        }
    }

    /// Run a search across all four views: the primary and secondary graphs
    /// are searched directly, then the super and combined result lists are
    /// derived from the two leaf result sets. The leaf searches must complete
    /// first; the derivation reads their results.
    pub fn search(&mut self, query: &SearchQuery) -> Result<()> {
        self.clear_results();

        for searcher in [&mut self.searchers.primary, &mut self.searchers.secondary] {
            searcher.set_regex(query.is_regex);
            searcher.set_case_sensitive(query.case_sensitive);
        }
        self.searchers
            .primary
            .search(&self.graphs.primary, &query.pattern)
            .context("searching the primary graph")?;
        self.searchers
            .secondary
            .search(&self.graphs.secondary, &query.pattern)
            .context("searching the secondary graph")?;

        let primary_addresses = self
            .searchers
            .primary
            .result_addresses(&self.graphs.primary, Side::Primary);
        let secondary_addresses = self
            .searchers
            .secondary
            .result_addresses(&self.graphs.secondary, Side::Secondary);
        self.searchers.super_graph.set_object_results(
            &self.graphs.super_graph,
            &primary_addresses,
            &secondary_addresses,
        );
        self.searchers.combined.set_object_results(
            &self.graphs.combined,
            &primary_addresses,
            &secondary_addresses,
        );

        let primary_results = self.searchers.primary.sub_results().to_vec();
        highlight_results(&mut self.graphs.primary, &primary_results, self.colors.primary);
        let secondary_results = self.searchers.secondary.sub_results().to_vec();
        highlight_results(
            &mut self.graphs.secondary,
            &secondary_results,
            self.colors.secondary,
        );
        self.mixed_borders = recolor_combined(
            &mut self.graphs.combined,
            &self.graphs.primary,
            &self.graphs.secondary,
            &self.colors,
        );
        Ok(())
    }

    /// Restore highlighting and drop all result state. The combined graph's
    /// mixed borders are undone along with the leaf-graph styles.
    pub fn clear_results(&mut self) {
        let primary_results = self.searchers.primary.sub_results().to_vec();
        remove_highlighting(&mut self.graphs.primary, &primary_results);
        let secondary_results = self.searchers.secondary.sub_results().to_vec();
        remove_highlighting(&mut self.graphs.secondary, &secondary_results);
        let saved = std::mem::take(&mut self.mixed_borders);
        restore_borders(&mut self.graphs.combined, &saved);

        self.searchers.primary.clear_results();
        self.searchers.secondary.clear_results();
        self.searchers.combined.clear_results();
        self.searchers.super_graph.clear_results();
    }

    /// Move the focused graph's result cursor one step and resolve the result
    /// to a camera-movable node. Super-graph results resolve into the
    /// single-side views, preferring the primary side.
    pub fn iterate_results(
        &mut self,
        focused: GraphKind,
        backwards: bool,
        zoom: bool,
    ) -> Option<JumpOutcome> {
        let searcher = match focused {
            GraphKind::Single(Side::Primary) => &mut self.searchers.primary,
            GraphKind::Single(Side::Secondary) => &mut self.searchers.secondary,
            GraphKind::Combined => &mut self.searchers.combined,
            GraphKind::Super => &mut self.searchers.super_graph,
        };
        let object = if backwards {
            searcher.previous()?
        } else {
            searcher.next()?
        };
        let wrapped = if searcher.is_after_last() {
            Some(WrapDirection::PastEnd)
        } else if searcher.is_before_first() {
            Some(WrapDirection::PastStart)
        } else {
            None
        };
        if let Some(direction) = wrapped {
            tracing::info!("{}", direction.message());
        }

        let (graph, node) = self.resolve_jump(focused, object)?;
        Some(JumpOutcome {
            graph,
            node,
            zoom,
            wrapped,
        })
    }

    fn resolve_jump(&self, focused: GraphKind, object: ResultObject) -> Option<(GraphKind, NodeId)> {
        // Edge results jump to the edge's source node first.
        let node_id = match object {
            ResultObject::Node(id) => id,
            ResultObject::Edge(id) => self.graphs.get(focused).edge_endpoints(id)?.0,
        };
        match focused {
            GraphKind::Super => {
                let data = self.graphs.super_graph.node(node_id)?.data;
                if let Some(address) = data.side_address(Side::Primary) {
                    let node = self.graphs.primary.node_on_side(Side::Primary, address)?;
                    Some((GraphKind::Single(Side::Primary), node))
                } else {
                    let address = data.side_address(Side::Secondary)?;
                    let node = self.graphs.secondary.node_on_side(Side::Secondary, address)?;
                    Some((GraphKind::Single(Side::Secondary), node))
                }
            }
            _ => Some((focused, node_id)),
        }
    }

    /// Record the view's current selection into its history.
    pub fn record_selection(&mut self, kind: GraphKind) {
        match kind {
            GraphKind::Single(Side::Primary) => {
                self.histories.primary.record(&self.graphs.primary)
            }
            GraphKind::Single(Side::Secondary) => {
                self.histories.secondary.record(&self.graphs.secondary)
            }
            GraphKind::Combined => self.histories.combined.record(&self.graphs.combined),
            GraphKind::Super => tracing::warn!("the super graph has no selection history"),
        }
    }

    pub fn undo_selection(&mut self, kind: GraphKind) {
        match kind {
            GraphKind::Single(Side::Primary) => {
                self.histories.primary.undo(&mut self.graphs.primary)
            }
            GraphKind::Single(Side::Secondary) => {
                self.histories.secondary.undo(&mut self.graphs.secondary)
            }
            GraphKind::Combined => self.histories.combined.undo(&mut self.graphs.combined),
            GraphKind::Super => tracing::warn!("the super graph has no selection history"),
        }
    }

    pub fn redo_selection(&mut self, kind: GraphKind) {
        match kind {
            GraphKind::Single(Side::Primary) => {
                self.histories.primary.redo(&mut self.graphs.primary)
            }
            GraphKind::Single(Side::Secondary) => {
                self.histories.secondary.redo(&mut self.graphs.secondary)
            }
            GraphKind::Combined => self.histories.combined.redo(&mut self.graphs.combined),
            GraphKind::Super => tracing::warn!("the super graph has no selection history"),
        }
    }

    /// Fan a basic-block match edit out to the three histories. The caller
    /// has already rebuilt the affected graphs.
    pub fn notify_match_change(&mut self, event: &MatchEvent) {
        self.histories
            .primary
            .process_match_event(event, &self.graphs.primary);
        self.histories
            .secondary
            .process_match_event(event, &self.graphs.secondary);
        self.histories
            .combined
            .process_match_event(event, &self.graphs.combined);
    }
}
