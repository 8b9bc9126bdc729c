//! Documents and dependency edges in, positioned and grouped graph out.
//!
//! Steps, in order:
//!
//! 1. drop edges naming unknown documents, keep only documents touched by an edge,
//! 2. apply the path-prefix filter to documents and then to edges,
//! 3. apply the node cap (by document id) and the edge cap (by input order),
//! 4. lay out the survivors, sorted by `(group key, id)`,
//! 5. wrap them in folder groups,
//! 6. emit group nodes before document nodes.
//!
//! The function is pure: the same input always yields the same ids, positions and colors.

use crate::aggregate::{GroupStyle, aggregate};
use crate::curvature::assign_curvature;
use crate::group_key::{UNGROUPED, resolve_group_key};
use crate::{
    DependencyEdge, Direction, Document, DocumentNodeData, Emphasis, Extent, GraphConfig, GraphEdge,
    GraphFilters, GraphNode, GraphView, GroupNodeData, NodeData, Position, Theme,
};
use docgraph_layout::{EdgeSpec, NodeSpec, layout_boxes};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

pub fn build(
    documents: &[Document],
    edges: &[DependencyEdge],
    direction: Direction,
    theme: Theme,
    filters: &GraphFilters,
    config: &GraphConfig,
) -> GraphView {
    let mut view = GraphView {
        direction,
        theme,
        ..Default::default()
    };

    let selection = select(documents, edges, filters, config);
    view.node_count = selection.documents.len();
    view.total_nodes = selection.total_nodes;
    view.edge_count = selection.edges.len();
    view.total_edges = selection.total_edges;
    if selection.documents.is_empty() {
        return view;
    }

    let mut ordered: Vec<&Document> = selection.documents.values().copied().collect();
    ordered.sort_by(|a, b| {
        resolve_group_key(a)
            .cmp(&resolve_group_key(b))
            .then_with(|| a.id.cmp(&b.id))
    });

    let node_specs: Vec<NodeSpec> = ordered
        .iter()
        .map(|d| NodeSpec::new(d.id.clone(), config.node_width, config.node_height))
        .collect();
    let edge_specs: Vec<EdgeSpec> = selection
        .edges
        .iter()
        .map(|e| EdgeSpec::new(e.from_doc_id.clone(), e.to_doc_id.clone()))
        .collect();
    let layout = layout_boxes(&node_specs, &edge_specs, &config.layout_options(direction));

    let style = GroupStyle {
        padding: config.group_padding,
        header: config.group_header,
    };
    let groups = aggregate(
        &layout.nodes,
        |n| {
            selection
                .documents
                .get(n.id.as_str())
                .map_or(UNGROUPED, |d| resolve_group_key(d))
        },
        &style,
        config.palette.for_theme(theme),
    );

    for group in &groups.groups {
        view.nodes.push(GraphNode {
            id: group.id.clone(),
            position: Position::new(group.x, group.y),
            width: group.width,
            height: group.height,
            parent: None,
            extent: None,
            data: NodeData::Group(GroupNodeData {
                label: group.key.clone(),
                group_key: group.key.clone(),
                color: group.color.clone(),
                member_count: group.member_count,
            }),
        });
    }
    for member in &groups.members {
        let Some(doc) = selection.documents.get(member.id.as_str()) else {
            continue;
        };
        view.nodes.push(GraphNode {
            id: member.id.clone(),
            position: Position::new(member.x, member.y),
            width: member.width,
            height: member.height,
            parent: Some(member.group_id.clone()),
            extent: Some(Extent::Parent),
            data: NodeData::Document(DocumentNodeData {
                label: doc.title.clone(),
                path: doc.path.clone(),
                keywords: doc.keywords.clone(),
                group_key: resolve_group_key(doc).to_string(),
                emphasis: Emphasis::Normal,
            }),
        });
    }

    view.edges = selection
        .edges
        .iter()
        .zip(&layout.edges)
        .map(|(edge, routed)| GraphEdge {
            id: edge.id.clone(),
            source: edge.from_doc_id.clone(),
            target: edge.to_doc_id.clone(),
            label: edge.link_text.clone().filter(|t| !t.is_empty()),
            curvature: 0.0,
            points: routed.points.clone(),
        })
        .collect();
    assign_curvature(&mut view.edges, config.curve_step);

    view
}

/// Result of the filtering steps, before layout.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    /// Surviving documents keyed by id, in input order.
    pub documents: IndexMap<&'a str, &'a Document>,
    pub total_nodes: usize,
    /// Surviving edges, in input order.
    pub edges: Vec<&'a DependencyEdge>,
    pub total_edges: usize,
}

pub fn select<'a>(
    documents: &'a [Document],
    edges: &'a [DependencyEdge],
    filters: &GraphFilters,
    config: &GraphConfig,
) -> Selection<'a> {
    let mut known: IndexMap<&str, &Document> = IndexMap::with_capacity(documents.len());
    for doc in documents {
        if known.contains_key(doc.id.as_str()) {
            tracing::debug!(id = %doc.id, "duplicate document id; keeping the first");
            continue;
        }
        known.insert(doc.id.as_str(), doc);
    }

    let mut kept_edges: Vec<&DependencyEdge> = Vec::with_capacity(edges.len());
    for edge in edges {
        let from_known = known.contains_key(edge.from_doc_id.as_str());
        let to_known = known.contains_key(edge.to_doc_id.as_str());
        if from_known && to_known {
            kept_edges.push(edge);
        } else {
            tracing::debug!(
                edge = %edge.id,
                from = %edge.from_doc_id,
                to = %edge.to_doc_id,
                "dropping edge with unknown endpoint"
            );
        }
    }

    let referenced: FxHashSet<&str> = kept_edges
        .iter()
        .flat_map(|e| [e.from_doc_id.as_str(), e.to_doc_id.as_str()])
        .collect();
    known.retain(|id, _| referenced.contains(id));

    if let Some(prefix) = filters.active_prefix() {
        known.retain(|_, doc| doc.path.starts_with(prefix));
        kept_edges.retain(|e| {
            known.contains_key(e.from_doc_id.as_str()) && known.contains_key(e.to_doc_id.as_str())
        });
    }

    let total_nodes = known.len();
    if !filters.show_all_nodes && known.len() > config.max_nodes {
        let mut ids: Vec<&str> = known.keys().copied().collect();
        ids.sort_unstable();
        let keep: FxHashSet<&str> = ids.into_iter().take(config.max_nodes).collect();
        known.retain(|id, _| keep.contains(id));
        kept_edges.retain(|e| {
            known.contains_key(e.from_doc_id.as_str()) && known.contains_key(e.to_doc_id.as_str())
        });
        tracing::debug!(shown = known.len(), total = total_nodes, "node cap applied");
    }

    let total_edges = kept_edges.len();
    if !filters.show_all_edges && kept_edges.len() > config.max_edges {
        kept_edges.truncate(config.max_edges);
        tracing::debug!(shown = kept_edges.len(), total = total_edges, "edge cap applied");
    }

    Selection {
        documents: known,
        total_nodes,
        edges: kept_edges,
        total_edges,
    }
}
