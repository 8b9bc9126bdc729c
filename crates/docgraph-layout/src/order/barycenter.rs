//! Barycenter ordering of a single layer against a fixed neighbor layer.

use super::Relationship;
use crate::{EdgeLabel, NodeLabel};
use docgraph_graphlib::{Graph, NodeIx};

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: NodeIx,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// Weighted mean position of each node's neighbors. `fixed_pos[u]` is `u`'s index in the fixed
/// layer; nodes with no neighbor there get `None`.
pub fn barycenter(
    g: &Graph<NodeLabel, EdgeLabel>,
    movable: &[NodeIx],
    fixed_pos: &[Option<usize>],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|&v| {
            let incident = match relationship {
                Relationship::InEdges => g.in_edges(v),
                Relationship::OutEdges => g.out_edges(v),
            };
            let mut sum = 0.0;
            let mut weight = 0.0;
            for &e in incident {
                let Some(entry) = g.edge(e) else {
                    continue;
                };
                let u = if entry.v == v { entry.w } else { entry.v };
                let Some(pos) = fixed_pos[u] else {
                    continue;
                };
                sum += entry.label.weight * pos as f64;
                weight += entry.label.weight;
            }
            BarycenterEntry {
                v,
                barycenter: (weight > 0.0).then(|| sum / weight),
                weight,
            }
        })
        .collect()
}

/// Sorts entries by barycenter. Entries without one keep their original slot; ties fall back to
/// the current index, flipped when `bias_right` is set so alternating sweeps can escape local
/// minima.
pub fn sort(entries: &[BarycenterEntry], bias_right: bool) -> Vec<NodeIx> {
    let mut sortable: Vec<(usize, NodeIx, f64)> = Vec::new();
    let mut unsortable: Vec<(usize, NodeIx)> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry.barycenter {
            Some(bc) => sortable.push((i, entry.v, bc)),
            None => unsortable.push((i, entry.v)),
        }
    }

    sortable.sort_by(|a, b| {
        a.2.total_cmp(&b.2).then_with(|| {
            if bias_right {
                b.0.cmp(&a.0)
            } else {
                a.0.cmp(&b.0)
            }
        })
    });
    // Pop from the back to take the smallest index first.
    unsortable.reverse();

    fn consume(out: &mut Vec<NodeIx>, unsortable: &mut Vec<(usize, NodeIx)>) {
        while let Some(&(i, v)) = unsortable.last() {
            if i > out.len() {
                break;
            }
            unsortable.pop();
            out.push(v);
        }
    }

    let mut out: Vec<NodeIx> = Vec::with_capacity(entries.len());
    consume(&mut out, &mut unsortable);
    for (_, v, _) in sortable {
        out.push(v);
        consume(&mut out, &mut unsortable);
    }
    out.extend(unsortable.into_iter().rev().map(|(_, v)| v));
    out
}
