use crate::{EdgeLabel, NodeLabel};
use docgraph_graphlib::{Graph, NodeIx};

/// Weighted number of edge crossings between every pair of adjacent layers.
pub fn cross_count(g: &Graph<NodeLabel, EdgeLabel>, layering: &[Vec<NodeIx>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Accumulator-tree count (Barth, Mutzel & Jünger).
fn two_layer_cross_count(
    g: &Graph<NodeLabel, EdgeLabel>,
    north: &[NodeIx],
    south: &[NodeIx],
) -> f64 {
    if south.is_empty() {
        return 0.0;
    }

    let mut south_pos: Vec<Option<usize>> = vec![None; g.node_count()];
    for (i, &v) in south.iter().enumerate() {
        south_pos[v] = Some(i);
    }

    let mut entries: Vec<(usize, f64)> = Vec::new();
    for &v in north {
        let start = entries.len();
        for &e in g.out_edges(v) {
            let Some(entry) = g.edge(e) else {
                continue;
            };
            if let Some(pos) = south_pos[entry.w] {
                entries.push((pos, entry.label.weight));
            }
        }
        entries[start..].sort_by_key(|&(pos, _)| pos);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<f64> = vec![0.0; tree_size];

    let mut cc: f64 = 0.0;
    for (pos, weight) in entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum: f64 = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }
    cc
}
