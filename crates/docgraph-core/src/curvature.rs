//! Spreads edges that share an unordered endpoint pair so they do not draw on top of each other.

use crate::GraphEdge;
use indexmap::IndexMap;

/// Edge `k` of the `n` edges between one pair gets `(k - (n - 1) / 2) * step`, negated when the
/// edge runs from the lexicographically larger id to the smaller. Lone edges stay straight.
pub fn assign_curvature(edges: &mut [GraphEdge], step: f64) {
    let mut pairs: IndexMap<(&str, &str), Vec<usize>> = IndexMap::new();
    for (i, edge) in edges.iter().enumerate() {
        pairs.entry(canonical(&edge.source, &edge.target)).or_default().push(i);
    }

    let mut curvature = vec![0.0; edges.len()];
    for members in pairs.values() {
        let n = members.len() as f64;
        for (k, &i) in members.iter().enumerate() {
            let mut c = (k as f64 - (n - 1.0) / 2.0) * step;
            if edges[i].source > edges[i].target {
                c = -c;
            }
            curvature[i] = c;
        }
    }

    for (edge, c) in edges.iter_mut().zip(curvature) {
        // Avoid emitting `-0`.
        edge.curvature = if c == 0.0 { 0.0 } else { c };
    }
}

fn canonical<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}
