//! Per-view search state machine

use crate::matcher::TextMatcher;
use crate::order::{cmp_results, sort_objects};
use crate::query::{SearchError, SearchQuery};
use crate::result::{ResultObject, SearchResult};
use parallax_core::{Address, GraphKind, Side, ViewGraph};
use std::collections::HashSet;

/// The per-side address footprint of a leaf result set, used to project
/// primary/secondary results onto the combined and super views by membership.
#[derive(Debug, Default, Clone)]
pub struct ResultAddresses {
    pub nodes: HashSet<Address>,
    pub edges: HashSet<(Address, Address)>,
}

/// Search state for one of the four view graphs: scope flags, the current
/// result lists, dirty tracking, and a cyclic cursor over the object results.
///
/// Single-side graphs search their own label text. The combined and super
/// graphs hold no directly searchable text; their result lists are derived
/// from the two leaf result sets via [`GraphSearcher::set_object_results`].
pub struct GraphSearcher {
    is_regex: bool,
    is_case_sensitive: bool,
    only_selected: bool,
    only_visible: bool,
    changed: bool,
    last_search_string: String,
    index: Option<usize>,
    is_after_last: bool,
    is_before_first: bool,
    sub_results: Vec<SearchResult>,
    object_results: Vec<ResultObject>,
}

impl std::fmt::Debug for GraphSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSearcher")
            .field("last_search_string", &self.last_search_string)
            .field("object_results", &self.object_results.len())
            .field("index", &self.index)
            .finish()
    }
}

impl GraphSearcher {
    pub fn new() -> Self {
        GraphSearcher {
            is_regex: false,
            is_case_sensitive: false,
            only_selected: false,
            only_visible: false,
            changed: false,
            last_search_string: String::new(),
            index: None,
            is_after_last: false,
            is_before_first: false,
            sub_results: Vec::new(),
            object_results: Vec::new(),
        }
    }

    pub fn set_regex(&mut self, value: bool) {
        if self.is_regex != value {
            self.is_regex = value;
            self.changed = true;
        }
    }

    pub fn set_case_sensitive(&mut self, value: bool) {
        if self.is_case_sensitive != value {
            self.is_case_sensitive = value;
            self.changed = true;
        }
    }

    pub fn set_only_selected(&mut self, value: bool) {
        if self.only_selected != value {
            self.only_selected = value;
            self.changed = true;
        }
    }

    pub fn set_only_visible(&mut self, value: bool) {
        if self.only_visible != value {
            self.only_visible = value;
            self.changed = true;
        }
    }

    /// True if the search state is dirty or the query differs from the last
    /// one; used to skip redundant searches.
    pub fn has_changed(&self, search_string: &str) -> bool {
        self.changed || search_string != self.last_search_string
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Run the text matchers over this graph's labels and rebuild the result
    /// lists. A no-op on the combined and super graphs.
    pub fn search(&mut self, graph: &ViewGraph, pattern: &str) -> Result<(), SearchError> {
        if !matches!(graph.kind(), GraphKind::Single(_)) {
            return Ok(());
        }

        let query = SearchQuery {
            pattern: pattern.to_string(),
            is_regex: self.is_regex,
            case_sensitive: self.is_case_sensitive,
        };
        let matcher = TextMatcher::compile(&query)?;
        self.sub_results.clear();
        self.object_results.clear();

        for node in graph.all_nodes() {
            if (self.only_selected && !node.selected) || (self.only_visible && !node.visible) {
                continue;
            }
            self.sub_results
                .extend(matcher.match_label(ResultObject::Node(node.id), &node.label));
        }
        for edge in graph.all_edges() {
            if (self.only_selected && !edge.selected) || (self.only_visible && !edge.visible) {
                continue;
            }
            if let Some(label) = &edge.label {
                self.sub_results
                    .extend(matcher.match_label(ResultObject::Edge(edge.id), label));
            }
        }

        self.sub_results.sort_by(|a, b| cmp_results(graph, a, b));
        let mut seen = HashSet::new();
        self.object_results = self
            .sub_results
            .iter()
            .map(|r| r.object)
            .filter(|object| seen.insert(*object))
            .collect();

        tracing::debug!(
            kind = ?graph.kind(),
            pattern = %pattern,
            objects = self.object_results.len(),
            matches = self.sub_results.len(),
            "search pass complete"
        );

        self.last_search_string = pattern.to_string();
        self.changed = false;
        self.reset_cursor();
        Ok(())
    }

    /// The per-side address footprint of this searcher's current results,
    /// resolved against the graph the search ran on.
    pub fn result_addresses(&self, graph: &ViewGraph, side: Side) -> ResultAddresses {
        let mut addresses = ResultAddresses::default();
        for object in &self.object_results {
            match *object {
                ResultObject::Node(id) => {
                    if let Some(address) = graph.node(id).and_then(|n| n.data.side_address(side)) {
                        addresses.nodes.insert(address);
                    }
                }
                ResultObject::Edge(id) => {
                    if let Some(endpoints) =
                        graph.edge(id).and_then(|e| e.data.side_endpoints(side))
                    {
                        addresses.edges.insert(endpoints);
                    }
                }
            }
        }
        addresses
    }

    /// Derive the combined/super object-result list by membership projection:
    /// include exactly the nodes and edges whose primary-side or
    /// secondary-side constituent appears in the corresponding leaf result
    /// set, address-ordered.
    pub fn set_object_results(
        &mut self,
        graph: &ViewGraph,
        primary: &ResultAddresses,
        secondary: &ResultAddresses,
    ) {
        self.sub_results.clear();
        self.object_results = graph
            .all_nodes()
            .filter(|n| {
                n.data
                    .side_address(Side::Primary)
                    .is_some_and(|a| primary.nodes.contains(&a))
                    || n.data
                        .side_address(Side::Secondary)
                        .is_some_and(|a| secondary.nodes.contains(&a))
            })
            .map(|n| ResultObject::Node(n.id))
            .collect();
        self.object_results.extend(
            graph
                .all_edges()
                .filter(|e| {
                    e.data
                        .side_endpoints(Side::Primary)
                        .is_some_and(|p| primary.edges.contains(&p))
                        || e.data
                            .side_endpoints(Side::Secondary)
                            .is_some_and(|p| secondary.edges.contains(&p))
                })
                .map(|e| ResultObject::Edge(e.id)),
        );
        sort_objects(graph, &mut self.object_results);
        self.reset_cursor();
    }

    /// Drop all results and mark the searcher dirty. Highlight restoration is
    /// the caller's job (the saved styles live in the sub-results).
    pub fn clear_results(&mut self) {
        self.sub_results.clear();
        self.object_results.clear();
        self.changed = true;
        self.reset_cursor();
    }

    pub fn sub_results(&self) -> &[SearchResult] {
        &self.sub_results
    }

    pub fn object_results(&self) -> &[ResultObject] {
        &self.object_results
    }

    pub fn result_count(&self) -> usize {
        self.object_results.len()
    }

    pub fn is_after_last(&self) -> bool {
        self.is_after_last
    }

    pub fn is_before_first(&self) -> bool {
        self.is_before_first
    }

    /// The result the cursor currently points at.
    pub fn current(&self) -> Option<ResultObject> {
        self.index.map(|i| self.object_results[i])
    }

    /// Advance the cursor. Wraps from the last result to index 0 and sets
    /// `is_after_last`; the call after a wrap continues from the wrapped
    /// index. With a single result that call stays put and just clears the
    /// flag, since any move would wrap again. Both wrap flags are reset at
    /// the start of each call, so they are mutually exclusive afterwards.
    pub fn next(&mut self) -> Option<ResultObject> {
        let was_after_last = self.is_after_last;
        self.is_after_last = false;
        self.is_before_first = false;
        if self.object_results.is_empty() {
            self.index = None;
            return None;
        }
        match self.index {
            None => self.index = Some(0),
            Some(_) if was_after_last && self.object_results.len() == 1 => {}
            Some(i) if i + 1 >= self.object_results.len() => {
                self.index = Some(0);
                self.is_after_last = true;
            }
            Some(i) => self.index = Some(i + 1),
        }
        self.current()
    }

    /// Retreat the cursor. Wraps from index 0 to the last result and sets
    /// `is_before_first`, mirroring [`GraphSearcher::next`].
    pub fn previous(&mut self) -> Option<ResultObject> {
        let was_before_first = self.is_before_first;
        self.is_after_last = false;
        self.is_before_first = false;
        if self.object_results.is_empty() {
            self.index = None;
            return None;
        }
        match self.index {
            None => {
                self.index = Some(self.object_results.len() - 1);
                self.is_before_first = true;
            }
            Some(_) if was_before_first && self.object_results.len() == 1 => {}
            Some(0) => {
                self.index = Some(self.object_results.len() - 1);
                self.is_before_first = true;
            }
            Some(i) => self.index = Some(i - 1),
        }
        self.current()
    }

    fn reset_cursor(&mut self) {
        self.index = None;
        self.is_after_last = false;
        self.is_before_first = false;
    }
}

impl Default for GraphSearcher {
    fn default() -> Self {
        Self::new()
    }
}
