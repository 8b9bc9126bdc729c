//! Break cycles by reversing a feedback arc set.
//!
//! Reversal only affects ranking; [`crate::layout`] restores the caller's edge orientation when it
//! copies routes back. Self-loops are expected to be filtered out before this pass.

use crate::{Acyclicer, EdgeLabel, NodeLabel};
use docgraph_graphlib::{EdgeIx, Graph, NodeIx};

/// Reverses the arc set chosen by `acyclicer` and returns the reversed edge indices.
pub fn run(g: &mut Graph<NodeLabel, EdgeLabel>, acyclicer: Acyclicer) -> Vec<EdgeIx> {
    let fas = match acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |lbl: &EdgeLabel| {
            if !lbl.weight.is_finite() {
                return 0;
            }
            lbl.weight.round() as i64
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };

    let mut reversed = Vec::with_capacity(fas.len());
    for e in fas {
        if g.edge(e).is_none_or(|entry| entry.is_self_loop()) {
            continue;
        }
        g.reverse_edge(e);
        if let Some(entry) = g.edge_mut(e) {
            entry.label.reversed = !entry.label.reversed;
        }
        reversed.push(e);
    }
    if !reversed.is_empty() {
        tracing::trace!(count = reversed.len(), "reversed feedback arcs");
    }
    reversed
}

/// Back edges of an insertion-ordered depth-first search.
pub fn dfs_fas<N, E>(g: &Graph<N, E>) -> Vec<EdgeIx> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        OnStack,
        Done,
    }

    let mut marks = vec![Mark::New; g.node_count()];
    let mut fas: Vec<EdgeIx> = Vec::new();

    for root in g.node_indices() {
        if marks[root] != Mark::New {
            continue;
        }
        marks[root] = Mark::OnStack;
        let mut stack: Vec<(NodeIx, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            let Some(&e) = g.out_edges(v).get(frame.1) else {
                marks[v] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let Some(entry) = g.edge(e) else {
                continue;
            };
            if entry.is_self_loop() {
                continue;
            }
            match marks[entry.w] {
                Mark::OnStack => fas.push(e),
                Mark::New => {
                    marks[entry.w] = Mark::OnStack;
                    stack.push((entry.w, 0));
                }
                Mark::Done => {}
            }
        }
    }
    fas
}
