//! Helper algorithms over [`Graph`].

use super::{Graph, NodeIx};
use std::collections::VecDeque;

/// Kahn topological sort. Returns `None` when the graph has a cycle (self-loops included).
pub fn topsort<N, E>(g: &Graph<N, E>) -> Option<Vec<NodeIx>> {
    let mut indegree: Vec<usize> = g.node_indices().map(|v| g.in_edges(v).len()).collect();
    let mut queue: VecDeque<NodeIx> = g.node_indices().filter(|&v| indegree[v] == 0).collect();
    let mut out: Vec<NodeIx> = Vec::with_capacity(g.node_count());

    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        }
    }

    (out.len() == g.node_count()).then_some(out)
}

pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    topsort(g).is_some()
}

/// Strongly connected components that contain a cycle: components with more than one node, or a
/// single node with a self-loop. Members are listed in insertion order; components are ordered by
/// their first member.
///
/// Tarjan's algorithm with an explicit stack, so deep chains do not grow the call stack.
pub fn find_cycles<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeIx>> {
    const UNVISITED: usize = usize::MAX;

    let n = g.node_count();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<NodeIx> = Vec::new();
    let mut next_index = 0usize;
    let mut sccs: Vec<Vec<NodeIx>> = Vec::new();

    for root in g.node_indices() {
        if index[root] != UNVISITED {
            continue;
        }

        // (node, position in its successor list)
        let mut work: Vec<(NodeIx, usize)> = vec![(root, 0)];
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = work.last_mut() {
            let v = frame.0;
            let succ: Option<NodeIx> = g.successors(v).nth(frame.1);
            if let Some(w) = succ {
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    work.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let mut scc: Vec<NodeIx> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    let mut cycles: Vec<Vec<NodeIx>> = sccs
        .into_iter()
        .filter(|scc| scc.len() > 1 || g.successors(scc[0]).any(|w| w == scc[0]))
        .map(|mut scc| {
            scc.sort_unstable();
            scc
        })
        .collect();
    cycles.sort_by_key(|scc| scc[0]);
    cycles
}
