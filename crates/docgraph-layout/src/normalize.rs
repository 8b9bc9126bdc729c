//! Split edges spanning several ranks into chains of rank-adjacent edges.
//!
//! Each intermediate rank gets a zero-size dummy node so ordering and positioning treat the long
//! edge as a polyline. [`undo`] reads the dummy centers back as bend points.

use crate::{EdgeLabel, NodeLabel, Point};
use docgraph_graphlib::{EdgeIx, Graph, NodeIx};

#[derive(Debug, Clone, PartialEq)]
pub struct DummyChain {
    /// Label of the removed long edge.
    pub label: EdgeLabel,
    /// Dummy nodes from the tail rank toward the head rank.
    pub dummies: Vec<NodeIx>,
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel>) -> Vec<DummyChain> {
    let mut chains = Vec::new();
    for e in g.edge_indices() {
        if let Some(chain) = normalize_edge(g, e) {
            chains.push(chain);
        }
    }
    chains
}

fn normalize_edge(g: &mut Graph<NodeLabel, EdgeLabel>, e: EdgeIx) -> Option<DummyChain> {
    let entry = g.edge(e)?;
    let (v, w) = (entry.v, entry.w);
    let v_rank = g.node(v)?.rank?;
    let w_rank = g.node(w)?.rank?;
    if w_rank <= v_rank + 1 {
        return None;
    }

    let removed = g.remove_edge(e)?;
    let mut label = removed.label;
    label.points.clear();

    let mut dummies = Vec::with_capacity((w_rank - v_rank - 1) as usize);
    let mut prev = v;
    for r in (v_rank + 1)..w_rank {
        let dummy = add_dummy_node(g, &format!("_d{e}_{r}"), r);
        g.add_edge(prev, dummy, chain_label(&label));
        dummies.push(dummy);
        prev = dummy;
    }
    g.add_edge(prev, w, chain_label(&label));

    Some(DummyChain { label, dummies })
}

fn add_dummy_node(g: &mut Graph<NodeLabel, EdgeLabel>, prefix: &str, rank: i32) -> NodeIx {
    let label = NodeLabel {
        rank: Some(rank),
        dummy: true,
        ..Default::default()
    };
    if !g.has_node(prefix) {
        return g.set_node(prefix, label);
    }
    let mut i = 1usize;
    loop {
        let id = format!("{prefix}_{i}");
        if !g.has_node(&id) {
            return g.set_node(id, label);
        }
        i += 1;
    }
}

fn chain_label(label: &EdgeLabel) -> EdgeLabel {
    EdgeLabel {
        minlen: 1,
        weight: label.weight,
        reversed: label.reversed,
        original: label.original,
        points: Vec::new(),
    }
}

/// Returns each chain's original label with `points` filled from the dummy centers.
pub fn undo(g: &Graph<NodeLabel, EdgeLabel>, chains: Vec<DummyChain>) -> Vec<EdgeLabel> {
    chains
        .into_iter()
        .map(|chain| {
            let mut label = chain.label;
            label.points = chain
                .dummies
                .iter()
                .filter_map(|&d| {
                    let n = g.node(d)?;
                    Some(Point::new(n.x?, n.y?))
                })
                .collect();
            label
        })
        .collect()
}
