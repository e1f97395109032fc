//! Integration tests for the parallax view engine
//!
//! These build a small four-view session over one diffed function pair and
//! drive search, result iteration, and selection history across a live match
//! edit, end to end.

use parallax::{
    Address, DiffGraphs, DiffSession, EdgeData, FunctionMatch, GraphKind, HighlightColors, Label,
    MatchEvent, NodeData, NodeKey, ResultObject, SearchQuery, Side, ViewGraph, WrapDirection,
};

fn function_pair() -> FunctionMatch {
    FunctionMatch {
        primary: Address(0x401000),
        secondary: Address(0x8000),
    }
}

/// Two-block flow graphs on each side; only the entry blocks are matched.
///
/// ```text
/// primary:   0x10 "mov eax, 1" -> 0x20 "ret"
/// secondary: 0x100 "MOV EAX, 2" -> 0x110 "nop"
/// match:     0x10 <-> 0x100
/// ```
fn build_session() -> DiffSession {
    let pair = function_pair();

    let mut primary = ViewGraph::new(GraphKind::Single(Side::Primary), pair);
    let p_entry = primary.add_node(
        NodeData::single(Side::Primary, Address(0x10)),
        Label::from_text(&["mov eax, 1"]),
    );
    let p_exit = primary.add_node(
        NodeData::single(Side::Primary, Address(0x20)),
        Label::from_text(&["ret"]),
    );
    primary.add_edge(
        p_entry,
        p_exit,
        EdgeData::single(Side::Primary, Address(0x10), Address(0x20)),
    );

    let mut secondary = ViewGraph::new(GraphKind::Single(Side::Secondary), pair);
    let s_entry = secondary.add_node(
        NodeData::single(Side::Secondary, Address(0x100)),
        Label::from_text(&["MOV EAX, 2"]),
    );
    let s_exit = secondary.add_node(
        NodeData::single(Side::Secondary, Address(0x110)),
        Label::from_text(&["nop"]),
    );
    secondary.add_edge(
        s_entry,
        s_exit,
        EdgeData::single(Side::Secondary, Address(0x100), Address(0x110)),
    );

    let mut combined = ViewGraph::new(GraphKind::Combined, pair);
    let c_entry = combined.add_node(
        NodeData::combined(Some(Address(0x10)), Some(Address(0x100))),
        Label::empty(),
    );
    let c_p_exit = combined.add_node(NodeData::combined(Some(Address(0x20)), None), Label::empty());
    let c_s_exit =
        combined.add_node(NodeData::combined(None, Some(Address(0x110))), Label::empty());
    combined.add_edge(
        c_entry,
        c_p_exit,
        EdgeData::combined(Some((Address(0x10), Address(0x20))), None),
    );
    combined.add_edge(
        c_entry,
        c_s_exit,
        EdgeData::combined(None, Some((Address(0x100), Address(0x110)))),
    );

    let mut super_graph = ViewGraph::new(GraphKind::Super, pair);
    let u_entry = super_graph.add_node(
        NodeData::super_of(&NodeData::combined(Some(Address(0x10)), Some(Address(0x100)))),
        Label::empty(),
    );
    let u_p_exit = super_graph.add_node(
        NodeData::super_of(&NodeData::combined(Some(Address(0x20)), None)),
        Label::empty(),
    );
    let u_s_exit = super_graph.add_node(
        NodeData::super_of(&NodeData::combined(None, Some(Address(0x110)))),
        Label::empty(),
    );
    super_graph.add_edge(
        u_entry,
        u_p_exit,
        EdgeData::super_of(&EdgeData::combined(Some((Address(0x10), Address(0x20))), None)),
    );
    super_graph.add_edge(
        u_entry,
        u_s_exit,
        EdgeData::super_of(&EdgeData::combined(
            None,
            Some((Address(0x100), Address(0x110))),
        )),
    );

    DiffSession::new(DiffGraphs::new(primary, secondary, combined, super_graph))
}

#[test]
fn test_search_projects_onto_all_four_views() {
    let mut session = build_session();
    session.search(&SearchQuery::literal("mov eax")).unwrap();

    // Both entry blocks match their leaf search.
    assert_eq!(session.searcher(GraphKind::Single(Side::Primary)).result_count(), 1);
    assert_eq!(session.searcher(GraphKind::Single(Side::Secondary)).result_count(), 1);

    // Exactly the matched combined/super entry node is derived, nothing else.
    let combined_results = session.searcher(GraphKind::Combined).object_results();
    assert_eq!(combined_results.len(), 1);
    let id = match combined_results[0] {
        ResultObject::Node(id) => id,
        other => panic!("expected a node result, got {other:?}"),
    };
    assert_eq!(
        session.graphs().combined.node(id).unwrap().data.key(),
        NodeKey::Combined {
            primary: Some(Address(0x10)),
            secondary: Some(Address(0x100)),
        }
    );
    assert_eq!(session.searcher(GraphKind::Super).result_count(), 1);
}

#[test]
fn test_search_scoped_to_one_side_still_reaches_combined() {
    let mut session = build_session();
    // "ret" exists only in the primary graph.
    session.search(&SearchQuery::literal("ret")).unwrap();

    assert_eq!(session.searcher(GraphKind::Single(Side::Primary)).result_count(), 1);
    assert_eq!(session.searcher(GraphKind::Single(Side::Secondary)).result_count(), 0);

    let combined_results = session.searcher(GraphKind::Combined).object_results();
    assert_eq!(combined_results.len(), 1);
    let id = match combined_results[0] {
        ResultObject::Node(id) => id,
        other => panic!("expected a node result, got {other:?}"),
    };
    assert_eq!(
        session.graphs().combined.node(id).unwrap().data.key(),
        NodeKey::Combined {
            primary: Some(Address(0x20)),
            secondary: None,
        }
    );
}

#[test]
fn test_super_results_resolve_to_primary_side() {
    let mut session = build_session();
    session.search(&SearchQuery::literal("mov eax")).unwrap();

    let outcome = session
        .iterate_results(GraphKind::Super, false, true)
        .unwrap();
    assert_eq!(outcome.graph, GraphKind::Single(Side::Primary));
    assert!(outcome.zoom);
    assert!(outcome.wrapped.is_none());
    let node = session.graphs().primary.node(outcome.node).unwrap();
    assert_eq!(node.data.side_address(Side::Primary), Some(Address(0x10)));

    // Single result: the next step wraps and surfaces the notice.
    let outcome = session
        .iterate_results(GraphKind::Super, false, false)
        .unwrap();
    assert_eq!(outcome.wrapped, Some(WrapDirection::PastEnd));
}

#[test]
fn test_super_results_fall_back_to_secondary_side() {
    let mut session = build_session();
    // "nop" exists only in the secondary graph; the super result has no
    // primary constituent.
    session.search(&SearchQuery::literal("nop")).unwrap();

    let outcome = session
        .iterate_results(GraphKind::Super, false, false)
        .unwrap();
    assert_eq!(outcome.graph, GraphKind::Single(Side::Secondary));
    let node = session.graphs().secondary.node(outcome.node).unwrap();
    assert_eq!(node.data.side_address(Side::Secondary), Some(Address(0x110)));
}

#[test]
fn test_bad_regex_surfaces_as_error() {
    let mut session = build_session();
    let err = session
        .search(&SearchQuery::regex("[unclosed"))
        .unwrap_err();
    assert!(err.to_string().contains("primary"));
}

#[test]
fn test_clear_results_restores_labels() {
    let mut session = build_session();
    let entry = session
        .graphs()
        .primary
        .node_on_side(Side::Primary, Address(0x10))
        .unwrap();
    let original = session.graphs().primary.node(entry).unwrap().label.clone();

    session.search(&SearchQuery::literal("mov")).unwrap();
    assert_ne!(session.graphs().primary.node(entry).unwrap().label, original);

    session.clear_results();
    assert_eq!(session.graphs().primary.node(entry).unwrap().label, original);
    assert_eq!(session.searcher(GraphKind::Single(Side::Primary)).result_count(), 0);
}

#[test]
fn test_clear_results_restores_mixed_combined_border() {
    let mut session = build_session();
    let c_entry = session
        .graphs()
        .combined
        .node_on_side(Side::Primary, Address(0x10))
        .unwrap();
    let original = session
        .graphs()
        .combined
        .node(c_entry)
        .unwrap()
        .label
        .border_color;

    // Only the primary entry block matches, so the combined entry node's
    // constituents diverge and its border goes mixed.
    session.search(&SearchQuery::literal("mov eax, 1")).unwrap();
    assert_eq!(
        session.graphs().combined.node(c_entry).unwrap().label.border_color,
        HighlightColors::default().mixed
    );

    session.clear_results();
    assert_eq!(
        session.graphs().combined.node(c_entry).unwrap().label.border_color,
        original
    );
}

#[test]
fn test_selection_history_survives_match_edit() {
    let mut session = build_session();
    let pair = function_pair();

    // Select the two unmatched exit blocks in the combined view and record.
    let p_exit = session
        .graphs()
        .combined
        .node_on_side(Side::Primary, Address(0x20))
        .unwrap();
    let s_exit = session
        .graphs()
        .combined
        .node_on_side(Side::Secondary, Address(0x110))
        .unwrap();
    session
        .graphs_mut()
        .combined
        .select_nodes(&[p_exit, s_exit], &[]);
    session.record_selection(GraphKind::Combined);

    // The user matches the exit blocks: the combined view is rebuilt with the
    // two unmatched nodes merged.
    let mut rebuilt = ViewGraph::new(GraphKind::Combined, pair);
    rebuilt.add_node(
        NodeData::combined(Some(Address(0x10)), Some(Address(0x100))),
        Label::empty(),
    );
    let merged = rebuilt.add_node(
        NodeData::combined(Some(Address(0x20)), Some(Address(0x110))),
        Label::empty(),
    );
    session.graphs_mut().combined = rebuilt;
    session.notify_match_change(&MatchEvent::added(pair, Address(0x20), Address(0x110)));

    // The recorded snapshot now selects the merged node.
    session.undo_selection(GraphKind::Combined);
    session.redo_selection(GraphKind::Combined);
    assert_eq!(session.graphs().combined.selected_nodes(), vec![merged]);
}

#[test]
fn test_undo_returns_to_empty_selection() {
    let mut session = build_session();
    let entry = session
        .graphs()
        .primary
        .node_on_side(Side::Primary, Address(0x10))
        .unwrap();

    session.graphs_mut().primary.select_nodes(&[entry], &[]);
    session.record_selection(GraphKind::Single(Side::Primary));
    assert_eq!(session.graphs().primary.selected_nodes(), vec![entry]);

    session.undo_selection(GraphKind::Single(Side::Primary));
    assert!(session.graphs().primary.selected_nodes().is_empty());

    session.redo_selection(GraphKind::Single(Side::Primary));
    assert_eq!(session.graphs().primary.selected_nodes(), vec![entry]);
}
