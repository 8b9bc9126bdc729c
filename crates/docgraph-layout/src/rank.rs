//! Rank assignment on an acyclic graph.
//!
//! Longest path from the sources, then sources are pulled toward their successors so they do not
//! sit at rank 0 with long edges hanging off them. Ranks are normalized to start at 0.

use crate::{EdgeLabel, NodeLabel};
use docgraph_graphlib::{Graph, NodeIx, alg};

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel>) {
    let Some(order) = alg::topsort(g) else {
        // The acyclic pass runs first; if a cycle slipped through, fall back to a single rank
        // instead of looping.
        tracing::warn!("rank assignment received a cyclic graph; collapsing to one rank");
        g.for_each_node_mut(|_, n| n.rank = Some(0));
        return;
    };

    longest_path(g, &order);
    tighten_sources(g, &order);
    normalize(g);
}

/// `rank(w) = max(rank(v) + minlen)` over incoming edges, visiting nodes in topological order.
pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel>, order: &[NodeIx]) {
    let mut ranks: Vec<i32> = vec![0; g.node_count()];
    for &v in order {
        for &e in g.out_edges(v) {
            let Some(entry) = g.edge(e) else {
                continue;
            };
            let candidate = ranks[v] + entry.label.minlen.max(1);
            if candidate > ranks[entry.w] {
                ranks[entry.w] = candidate;
            }
        }
    }
    g.for_each_node_mut(|v, n| n.rank = Some(ranks[v]));
}

/// Moves every source down to `min(rank(successor) - minlen)`.
pub fn tighten_sources(g: &mut Graph<NodeLabel, EdgeLabel>, order: &[NodeIx]) {
    for &v in order.iter().rev() {
        if !g.in_edges(v).is_empty() || g.out_edges(v).is_empty() {
            continue;
        }
        let target = g
            .out_edges(v)
            .iter()
            .filter_map(|&e| g.edge(e))
            .filter_map(|entry| {
                let w_rank = g.node(entry.w)?.rank?;
                Some(w_rank - entry.label.minlen.max(1))
            })
            .min();
        if let (Some(target), Some(label)) = (target, g.node_mut(v)) {
            label.rank = Some(target);
        }
    }
}

pub fn normalize(g: &mut Graph<NodeLabel, EdgeLabel>) {
    let min = g
        .nodes()
        .filter_map(|(_, _, n)| n.rank)
        .min()
        .unwrap_or(0);
    g.for_each_node_mut(|_, n| {
        n.rank = Some(n.rank.unwrap_or(min) - min);
    });
}

/// Signed rank distance minus `minlen`; zero for a tight edge.
pub fn slack(g: &Graph<NodeLabel, EdgeLabel>, e: docgraph_graphlib::EdgeIx) -> Option<i32> {
    let entry = g.edge(e)?;
    let v_rank = g.node(entry.v)?.rank?;
    let w_rank = g.node(entry.w)?.rank?;
    Some(w_rank - v_rank - entry.label.minlen)
}
