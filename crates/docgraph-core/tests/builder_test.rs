use docgraph_core::{
    DependencyEdge, Direction, Document, GraphConfig, GraphFilters, GraphView, NodeData, Theme,
    UNGROUPED, build,
};

fn doc(id: &str, path: &str) -> Document {
    Document::new(id, path, id.to_uppercase())
}

fn edge(id: &str, from: &str, to: &str) -> DependencyEdge {
    DependencyEdge::new(id, from, to)
}

fn build_default(documents: &[Document], edges: &[DependencyEdge]) -> GraphView {
    build(
        documents,
        edges,
        Direction::TB,
        Theme::Light,
        &GraphFilters::default(),
        &GraphConfig::default(),
    )
}

fn doc_ids(view: &GraphView) -> Vec<&str> {
    let mut ids: Vec<&str> = view.document_nodes().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

fn chain(n: usize) -> (Vec<Document>, Vec<DependencyEdge>) {
    let documents: Vec<Document> = (0..n).map(|i| doc(&format!("d{i:03}"), "notes")).collect();
    let edges = (1..n)
        .map(|i| edge(&format!("e{i}"), &format!("d{:03}", i - 1), &format!("d{i:03}")))
        .collect();
    (documents, edges)
}

#[test]
fn empty_input_yields_an_empty_view() {
    let view = build_default(&[], &[]);
    assert!(view.nodes.is_empty());
    assert!(view.edges.is_empty());
    assert_eq!(
        (view.node_count, view.total_nodes, view.edge_count, view.total_edges),
        (0, 0, 0, 0)
    );
    assert!(view.is_empty());
}

#[test]
fn documents_without_edges_are_excluded() {
    let docs = vec![doc("a", "x"), doc("b", "x"), doc("lonely", "x")];
    let view = build_default(&docs, &[edge("e1", "a", "b")]);
    assert_eq!(doc_ids(&view), vec!["a", "b"]);
    assert!(view.node("lonely").is_none());
}

#[test]
fn edges_with_unknown_endpoints_are_dropped() {
    let docs = vec![doc("a", "x"), doc("b", "x")];
    let edges = vec![edge("e1", "a", "b"), edge("e2", "a", "ghost"), edge("e3", "ghost", "b")];
    let view = build_default(&docs, &edges);
    assert_eq!(view.edges.len(), 1);
    assert_eq!(view.edges[0].id, "e1");
    assert_eq!(view.total_edges, 1);
}

#[test]
fn every_edge_references_output_nodes() {
    let docs = vec![doc("a", "x"), doc("b", "y"), doc("c", ""), doc("d", "y")];
    let edges = vec![
        edge("e1", "a", "b"),
        edge("e2", "b", "c"),
        edge("e3", "c", "a"),
        edge("e4", "d", "missing"),
    ];
    let view = build_default(&docs, &edges);
    for e in &view.edges {
        assert!(view.node(&e.source).is_some_and(|n| !n.is_group()));
        assert!(view.node(&e.target).is_some_and(|n| !n.is_group()));
    }
    assert!(view.node("d").is_none());
}

#[test]
fn build_is_deterministic() {
    let docs = vec![
        doc("a", "x"),
        doc("b", "y"),
        doc("c", ""),
        doc("d", "y"),
        doc("e", "x/z"),
    ];
    let edges = vec![
        edge("e1", "a", "b"),
        edge("e2", "b", "c"),
        edge("e3", "c", "a"),
        edge("e4", "d", "e"),
        edge("e5", "a", "e"),
        edge("e6", "e", "e"),
    ];
    for direction in [Direction::TB, Direction::LR] {
        let filters = GraphFilters::default();
        let config = GraphConfig::default();
        let first = build(&docs, &edges, direction, Theme::Dark, &filters, &config);
        let second = build(&docs, &edges, direction, Theme::Dark, &filters, &config);
        assert_eq!(first, second);
    }
}

#[test]
fn groups_come_before_their_members() {
    let docs = vec![doc("a", "x"), doc("b", "y"), doc("c", "")];
    let edges = vec![edge("e1", "a", "b"), edge("e2", "b", "c")];
    let view = build_default(&docs, &edges);

    let last_group = view.nodes.iter().rposition(|n| n.is_group()).unwrap();
    let first_doc = view.nodes.iter().position(|n| !n.is_group()).unwrap();
    assert!(last_group < first_doc);

    let group_ids: Vec<&str> = view.group_nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(group_ids, vec!["group:ungrouped", "group:x", "group:y"]);

    for node in view.document_nodes() {
        let parent = node.parent.as_deref().unwrap();
        assert!(view.node(parent).is_some_and(|g| g.is_group()));
    }
    let c = view.node("c").unwrap();
    assert_eq!(c.parent.as_deref(), Some("group:ungrouped"));
    assert_eq!(c.as_document().unwrap().group_key, UNGROUPED);
}

#[test]
fn group_boxes_contain_their_members() {
    let docs = vec![
        doc("a", "x"),
        doc("b", "x"),
        doc("c", "y"),
        doc("d", "y"),
        doc("e", "x"),
    ];
    let edges = vec![
        edge("e1", "a", "b"),
        edge("e2", "b", "c"),
        edge("e3", "c", "d"),
        edge("e4", "a", "e"),
        edge("e5", "d", "a"),
    ];
    let config = GraphConfig::default();
    for direction in [Direction::TB, Direction::LR] {
        let view = build(&docs, &edges, direction, Theme::Light, &GraphFilters::default(), &config);
        for node in view.document_nodes() {
            let group = view.node(node.parent.as_deref().unwrap()).unwrap();
            let abs = view.absolute_position(&node.id).unwrap();
            assert!(abs.x >= group.position.x + config.group_padding - 1e-9);
            assert!(
                abs.y >= group.position.y + config.group_padding + config.group_header - 1e-9
            );
            assert!(
                abs.x + node.width
                    <= group.position.x + group.width - config.group_padding + 1e-9
            );
            assert!(
                abs.y + node.height
                    <= group.position.y + group.height - config.group_padding + 1e-9
            );
            assert!(abs.x.is_finite() && abs.y.is_finite());
        }
    }
}

#[test]
fn members_are_positioned_relative_to_their_group() {
    let docs = vec![doc("a", "docs"), doc("b", "docs")];
    let view = build_default(&docs, &[edge("e1", "a", "b")]);

    let group = view.node("group:docs").unwrap();
    assert_eq!((group.position.x, group.position.y), (-20.0, -48.0));
    assert_eq!((group.width, group.height), (220.0, 228.0));

    let a = view.node("a").unwrap();
    let b = view.node("b").unwrap();
    assert_eq!((a.position.x, a.position.y), (20.0, 48.0));
    assert_eq!((b.position.x, b.position.y), (20.0, 168.0));
    assert_eq!((a.width, a.height), (180.0, 40.0));
}

#[test]
fn direction_changes_the_rank_axis() {
    let docs = vec![doc("a", "docs"), doc("b", "docs")];
    let edges = vec![edge("e1", "a", "b")];
    let filters = GraphFilters::default();
    let config = GraphConfig::default();

    let tb = build(&docs, &edges, Direction::TB, Theme::Light, &filters, &config);
    let a = tb.absolute_position("a").unwrap();
    let b = tb.absolute_position("b").unwrap();
    assert_eq!(a.x, b.x);
    assert!(b.y > a.y);

    let lr = build(&docs, &edges, Direction::LR, Theme::Light, &filters, &config);
    let a = lr.absolute_position("a").unwrap();
    let b = lr.absolute_position("b").unwrap();
    assert_eq!(a.y, b.y);
    assert_eq!(b.x - a.x, 180.0 + 80.0);
    assert_eq!(lr.direction, Direction::LR);
}

#[test]
fn group_colors_do_not_depend_on_input_order() {
    let ordered = vec![doc("a1", "a"), doc("b1", "b"), doc("c1", "c")];
    let shuffled = vec![doc("b1", "b"), doc("a1", "a"), doc("c1", "c")];
    let edges = vec![edge("e1", "a1", "b1"), edge("e2", "b1", "c1")];
    let shuffled_edges = vec![edge("e2", "b1", "c1"), edge("e1", "a1", "b1")];

    let colors = |view: &GraphView| -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = view
            .group_nodes()
            .filter_map(|n| n.as_group())
            .map(|g| (g.group_key.clone(), g.color.clone()))
            .collect();
        out.sort();
        out
    };

    let first = build_default(&ordered, &edges);
    let second = build_default(&shuffled, &shuffled_edges);
    assert_eq!(colors(&first), colors(&second));

    let palette = GraphConfig::default().palette.light;
    assert_eq!(
        colors(&first),
        vec![
            ("a".to_string(), palette[0].clone()),
            ("b".to_string(), palette[1].clone()),
            ("c".to_string(), palette[2].clone()),
        ]
    );
}

#[test]
fn theme_selects_the_palette_without_reordering_groups() {
    let docs = vec![doc("a1", "a"), doc("b1", "b")];
    let edges = vec![edge("e1", "a1", "b1")];
    let config = GraphConfig::default();
    let dark = build(&docs, &edges, Direction::TB, Theme::Dark, &GraphFilters::default(), &config);
    let group = dark.node("group:b").and_then(|n| n.as_group()).unwrap();
    assert_eq!(group.color, config.palette.dark[1]);
    assert_eq!(dark.theme, Theme::Dark);
}

#[test]
fn node_cap_reports_shown_and_total_counts() {
    let (docs, edges) = chain(150);

    let capped = build_default(&docs, &edges);
    assert_eq!(capped.node_count, 100);
    assert_eq!(capped.total_nodes, 150);
    assert_eq!(capped.document_nodes().count(), 100);
    assert_eq!(doc_ids(&capped).last().copied(), Some("d099"));
    assert_eq!(capped.edge_count, 99);

    let filters = GraphFilters {
        show_all_nodes: true,
        ..Default::default()
    };
    let all = build(&docs, &edges, Direction::TB, Theme::Light, &filters, &GraphConfig::default());
    assert_eq!(all.node_count, all.total_nodes);
    assert_eq!(all.node_count, 150);
    assert_eq!(all.edge_count, 149);
}

#[test]
fn edge_cap_keeps_the_first_edges_in_input_order() {
    let docs = vec![doc("hub", "x"), doc("a", "x"), doc("b", "x"), doc("c", "x")];
    let edges = vec![
        edge("e1", "hub", "a"),
        edge("e2", "hub", "b"),
        edge("e3", "hub", "c"),
        edge("e4", "a", "b"),
    ];
    let config = GraphConfig {
        max_edges: 2,
        ..Default::default()
    };

    let capped = build(
        &docs,
        &edges,
        Direction::TB,
        Theme::Light,
        &GraphFilters::default(),
        &config,
    );
    let ids: Vec<&str> = capped.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
    assert_eq!((capped.edge_count, capped.total_edges), (2, 4));
    // Documents stay even when the cap removes all of their edges.
    assert!(capped.node("c").is_some());

    let filters = GraphFilters {
        show_all_edges: true,
        ..Default::default()
    };
    let all = build(&docs, &edges, Direction::TB, Theme::Light, &filters, &config);
    assert_eq!(all.edge_count, all.total_edges);
}

#[test]
fn path_filter_requires_both_endpoints() {
    let docs = vec![doc("1", "a/b"), doc("2", "x/y")];
    let edges = vec![edge("e1", "1", "2")];
    let filters = GraphFilters {
        path_prefix: Some("a".to_string()),
        ..Default::default()
    };
    let view = build(&docs, &edges, Direction::TB, Theme::Light, &filters, &GraphConfig::default());
    assert!(view.edges.is_empty());
    assert!(view.node("2").is_none());
    assert_eq!(doc_ids(&view), vec!["1"]);
    assert!(view.is_empty());
}

#[test]
fn empty_path_filter_is_ignored() {
    let docs = vec![doc("1", "a/b"), doc("2", "x/y")];
    let edges = vec![edge("e1", "1", "2")];
    let filters = GraphFilters {
        path_prefix: Some(String::new()),
        ..Default::default()
    };
    let view = build(&docs, &edges, Direction::TB, Theme::Light, &filters, &GraphConfig::default());
    assert_eq!(view.edges.len(), 1);
}

#[test]
fn self_edges_do_not_break_the_build() {
    let docs = vec![doc("d1", "x")];
    let view = build_default(&docs, &[edge("e1", "d1", "d1")]);
    let node = view.node("d1").unwrap();
    assert!(node.position.x.is_finite() && node.position.y.is_finite());
    assert_eq!(view.edges.len(), 1);
    assert_eq!(view.edges[0].curvature, 0.0);
}

#[test]
fn document_nodes_carry_typed_display_data() {
    let mut a = doc("a", "notes");
    a.keywords = vec!["rust".to_string()];
    let docs = vec![a, doc("b", "notes")];
    let edges = vec![
        edge("e1", "a", "b").with_link_text("see b"),
        edge("e2", "b", "a").with_link_text(""),
    ];
    let view = build_default(&docs, &edges);

    match &view.node("a").unwrap().data {
        NodeData::Document(data) => {
            assert_eq!(data.label, "A");
            assert_eq!(data.path, "notes");
            assert_eq!(data.keywords, vec!["rust".to_string()]);
        }
        NodeData::Group(_) => panic!("expected a document node"),
    }
    assert_eq!(view.edges[0].label.as_deref(), Some("see b"));
    assert_eq!(view.edges[1].label, None);
}

#[test]
fn long_edges_carry_bend_points() {
    let docs = vec![doc("a", "x"), doc("b", "x"), doc("c", "x")];
    let edges = vec![edge("e1", "a", "b"), edge("e2", "b", "c"), edge("e3", "a", "c")];
    let view = build_default(&docs, &edges);
    let long = view.edges.iter().find(|e| e.id == "e3").unwrap();
    assert_eq!(long.points.len(), 1);
    assert!(view.edges.iter().filter(|e| e.id != "e3").all(|e| e.points.is_empty()));
}

#[test]
fn view_serializes_with_camel_case_keys_and_tagged_data() {
    let docs = vec![doc("a", "x"), doc("b", "x")];
    let view = build_default(&docs, &[edge("e1", "a", "b")]);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["nodeCount"], 2);
    assert_eq!(json["totalEdges"], 1);
    assert_eq!(json["nodes"][0]["data"]["kind"], "group");
    assert_eq!(json["nodes"][1]["data"]["kind"], "document");
    assert_eq!(json["nodes"][1]["extent"], "parent");
    assert_eq!(json["nodes"][1]["data"]["groupKey"], "x");
}
