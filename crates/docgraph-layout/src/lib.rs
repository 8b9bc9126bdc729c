#![forbid(unsafe_code)]

//! Layered graph layout.
//!
//! A deterministic, single-pass Sugiyama pipeline for directed graphs that may contain cycles:
//!
//! 1. self-loops are set aside (they have no rank of their own),
//! 2. a feedback arc set is reversed so ranking sees a DAG ([`acyclic`]),
//! 3. ranks are assigned by longest path ([`rank`]),
//! 4. edges spanning several ranks are split by dummy nodes ([`normalize`]),
//! 5. barycenter sweeps reduce crossings ([`order`]),
//! 6. coordinates are assigned band by band ([`position`]).
//!
//! Left-to-right layouts re-run the whole pipeline with node extents swapped
//! ([`coordinate_system`]); nothing is transposed after the fact.

pub use docgraph_graphlib as graphlib;

pub mod acyclic;
pub mod coordinate_system;
pub mod greedy_fas;
pub mod model;
pub mod normalize;
pub mod order;
pub mod position;
pub mod rank;

pub use model::{
    Acyclicer, EdgeLabel, EdgeSpec, LayoutOptions, LayoutResult, NodeLabel, NodeSpec, PlacedNode,
    Point, RankDir, RoutedEdge,
};

use graphlib::{EdgeIx, Graph};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `g` in place: every node gets `x`/`y` (center), `rank` and `order`; every edge gets
/// its bend points. Never fails; empty graphs are left untouched.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel>, options: &LayoutOptions) {
    if g.node_count() == 0 {
        return;
    }

    let mut work: Graph<NodeLabel, EdgeLabel> =
        Graph::with_capacity(g.node_count(), g.edge_count());
    for (_, id, label) in g.nodes() {
        work.set_node(id, NodeLabel::sized(label.width, label.height));
    }
    let mut self_loops = 0usize;
    for (e, entry) in g.edges() {
        if entry.is_self_loop() {
            self_loops += 1;
            continue;
        }
        work.add_edge(
            entry.v,
            entry.w,
            EdgeLabel {
                minlen: entry.label.minlen.max(1),
                weight: entry.label.weight,
                original: Some(e),
                ..Default::default()
            },
        );
    }
    if self_loops > 0 {
        tracing::debug!(self_loops, "self-loops excluded from ranking");
    }

    coordinate_system::adjust(&mut work, options.rankdir);
    acyclic::run(&mut work, options.acyclicer);
    rank::run(&mut work);
    let chains = normalize::run(&mut work);
    let layering = order::order(&mut work, options.max_order_sweeps);
    position::position(&mut work, &layering, options);
    coordinate_system::undo(&mut work, options.rankdir);
    let routed = normalize::undo(&work, chains);

    // Real nodes were inserted first and in the same order, so indices line up.
    for v in g.node_indices() {
        let Some(placed) = work.node(v).cloned() else {
            continue;
        };
        if let Some(label) = g.node_mut(v) {
            label.x = placed.x;
            label.y = placed.y;
            label.rank = placed.rank;
            label.order = placed.order;
        }
    }

    for e in g.edge_indices() {
        if let Some(entry) = g.edge_mut(e) {
            entry.label.points.clear();
        }
    }
    for label in routed {
        let Some(e) = label.original else {
            continue;
        };
        let mut points = label.points;
        if label.reversed {
            points.reverse();
        }
        if let Some(entry) = g.edge_mut(e) {
            entry.label.points = points;
        }
    }
}

/// Convenience wrapper: lays out boxes identified by string ids.
///
/// Duplicate node ids collapse to the last size given. Edges naming unknown nodes are skipped.
/// Nodes come back in input order with top-left positions; edges in input order.
pub fn layout_boxes(
    nodes: &[NodeSpec],
    edges: &[EdgeSpec],
    options: &LayoutOptions,
) -> LayoutResult {
    let mut g: Graph<NodeLabel, EdgeLabel> = Graph::with_capacity(nodes.len(), edges.len());
    for n in nodes {
        g.set_node(n.id.as_str(), NodeLabel::sized(n.width, n.height));
    }

    let mut kept: Vec<EdgeIx> = Vec::with_capacity(edges.len());
    for edge in edges {
        match g.add_edge_by_id(&edge.source, &edge.target, EdgeLabel::default()) {
            Some(e) => kept.push(e),
            None => tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                "skipping edge with unknown endpoint"
            ),
        }
    }

    layout(&mut g, options);

    let mut result = LayoutResult::default();
    for (_, id, label) in g.nodes() {
        let Some(top_left) = label.top_left() else {
            continue;
        };
        result.width = result.width.max(top_left.x + label.width);
        result.height = result.height.max(top_left.y + label.height);
        result.nodes.push(PlacedNode {
            id: id.to_string(),
            x: top_left.x,
            y: top_left.y,
            width: label.width,
            height: label.height,
            rank: label.rank.unwrap_or(0),
        });
    }
    for e in kept {
        let Some(entry) = g.edge(e) else {
            continue;
        };
        result.edges.push(RoutedEdge {
            source: g.node_id(entry.v).to_string(),
            target: g.node_id(entry.w).to_string(),
            points: entry.label.points.clone(),
        });
    }
    result
}
