use crate::{EdgeLabel, NodeLabel};
use docgraph_graphlib::{Graph, NodeIx};

/// Initial layering: a depth-first walk from nodes sorted by `(rank, insertion index)`, appending
/// each node to its rank's layer on first visit. Keeps connected nodes close together.
pub fn init_order(g: &Graph<NodeLabel, EdgeLabel>) -> Vec<Vec<NodeIx>> {
    let Some(max_rank) = g.nodes().filter_map(|(_, _, n)| n.rank).max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<NodeIx>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];

    let mut start: Vec<NodeIx> = g.node_indices().collect();
    start.sort_by_key(|&v| (g.node(v).and_then(|n| n.rank).unwrap_or(i32::MAX), v));

    let mut visited = vec![false; g.node_count()];
    let mut stack: Vec<NodeIx> = Vec::new();
    for root in start {
        if visited[root] {
            continue;
        }
        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            if let Some(rank) = g.node(v).and_then(|n| n.rank) {
                if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
                    layer.push(v);
                }
            }
            // Reverse so the first successor is visited first.
            let succ: Vec<NodeIx> = g.successors(v).filter(|&w| !visited[w]).collect();
            stack.extend(succ.into_iter().rev());
        }
    }

    layers
}
