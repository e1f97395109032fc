//! Total order over heterogeneous result objects
//!
//! Results sort ascending by anchoring address; matches within the same
//! object break ties by line. An object that no longer resolves in its graph
//! is an invariant violation and the comparator fails fast rather than
//! mis-ordering it silently.

use crate::result::{ResultObject, SearchResult};
use parallax_core::{Address, ViewGraph};
use std::cmp::Ordering;

/// Resolve an object's anchoring address, panicking if the object is gone.
pub fn anchor_of(graph: &ViewGraph, object: ResultObject) -> Address {
    match object {
        ResultObject::Node(id) => graph
            .node(id)
            .unwrap_or_else(|| panic!("search result references missing node {id:?}"))
            .data
            .anchor(),
        ResultObject::Edge(id) => graph
            .edge(id)
            .unwrap_or_else(|| panic!("search result references missing edge {id:?}"))
            .data
            .anchor(),
    }
}

pub fn cmp_objects(graph: &ViewGraph, a: ResultObject, b: ResultObject) -> Ordering {
    anchor_of(graph, a).cmp(&anchor_of(graph, b))
}

pub fn cmp_results(graph: &ViewGraph, a: &SearchResult, b: &SearchResult) -> Ordering {
    cmp_objects(graph, a.object, b.object).then(a.line.cmp(&b.line))
}

/// Address-sort an object list in place (stable: equal addresses keep
/// insertion order).
pub fn sort_objects(graph: &ViewGraph, objects: &mut [ResultObject]) {
    objects.sort_by(|a, b| cmp_objects(graph, *a, *b));
}
