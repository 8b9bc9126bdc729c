//! Coordinate assignment in the top-to-bottom frame.
//!
//! Ranks become horizontal bands separated by `ranksep`. Within a band, nodes keep their order and
//! minimum separation while being pulled toward the mean position of their neighbors: each
//! alignment step is a weighted isotonic regression (pool adjacent violators) on the node centers
//! shifted by their cumulative minimum offsets, which yields the closest placement that still
//! respects the order and separation constraints.

use crate::{EdgeLabel, LayoutOptions, NodeLabel};
use docgraph_graphlib::{Graph, NodeIx};

/// Anchor weight for nodes that have no neighbor in the reference layer.
const FREE_NODE_WEIGHT: f64 = 0.01;
/// Extra pull applied to long-edge bend points so chains stay straight.
const DUMMY_WEIGHT_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    Above,
    Below,
    Both,
}

pub fn position(
    g: &mut Graph<NodeLabel, EdgeLabel>,
    layering: &[Vec<NodeIx>],
    options: &LayoutOptions,
) {
    assign_y(g, layering, options.ranksep);

    let mut xs: Vec<f64> = vec![0.0; g.node_count()];
    pack(g, layering, options, &mut xs);

    for _ in 0..options.position_passes {
        for layer in layering.iter().skip(1) {
            align(g, layer, options, Reference::Above, &mut xs);
        }
        for layer in layering.iter().rev().skip(1) {
            align(g, layer, options, Reference::Below, &mut xs);
        }
    }
    for layer in layering {
        align(g, layer, options, Reference::Both, &mut xs);
    }

    g.for_each_node_mut(|v, n| n.x = Some(xs[v]));
    translate_to_origin(g);
}

fn assign_y(g: &mut Graph<NodeLabel, EdgeLabel>, layering: &[Vec<NodeIx>], ranksep: f64) {
    let mut cursor = 0.0;
    for layer in layering {
        let band = layer
            .iter()
            .filter_map(|&v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for &v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(cursor + band / 2.0);
            }
        }
        cursor += band + ranksep;
    }
}

fn separation(a: &NodeLabel, b: &NodeLabel, options: &LayoutOptions) -> f64 {
    let side = |n: &NodeLabel| {
        if n.dummy {
            options.edgesep
        } else {
            options.nodesep
        }
    };
    a.width / 2.0 + (side(a) + side(b)) / 2.0 + b.width / 2.0
}

fn offsets(g: &Graph<NodeLabel, EdgeLabel>, layer: &[NodeIx], options: &LayoutOptions) -> Vec<f64> {
    let mut out = Vec::with_capacity(layer.len());
    let mut acc = 0.0;
    for (i, &v) in layer.iter().enumerate() {
        if i > 0 {
            if let (Some(a), Some(b)) = (g.node(layer[i - 1]), g.node(v)) {
                acc += separation(a, b, options);
            }
        }
        out.push(acc);
    }
    out
}

/// Left-packed starting placement.
fn pack(
    g: &Graph<NodeLabel, EdgeLabel>,
    layering: &[Vec<NodeIx>],
    options: &LayoutOptions,
    xs: &mut [f64],
) {
    for layer in layering {
        for (&v, off) in layer.iter().zip(offsets(g, layer, options)) {
            xs[v] = off;
        }
    }
}

fn align(
    g: &Graph<NodeLabel, EdgeLabel>,
    layer: &[NodeIx],
    options: &LayoutOptions,
    reference: Reference,
    xs: &mut [f64],
) {
    if layer.is_empty() {
        return;
    }
    let offs = offsets(g, layer, options);

    let mut targets: Vec<f64> = Vec::with_capacity(layer.len());
    let mut weights: Vec<f64> = Vec::with_capacity(layer.len());
    for (i, &v) in layer.iter().enumerate() {
        let (desired, weight) = match neighbor_mean(g, v, reference, xs) {
            Some((mean, w)) => {
                let factor = if g.node(v).is_some_and(|n| n.dummy) {
                    DUMMY_WEIGHT_FACTOR
                } else {
                    1.0
                };
                (mean, w * factor)
            }
            None => (xs[v], FREE_NODE_WEIGHT),
        };
        targets.push(desired - offs[i]);
        weights.push(weight);
    }

    let fitted = isotonic_fit(&targets, &weights);
    for (i, &v) in layer.iter().enumerate() {
        xs[v] = fitted[i] + offs[i];
    }
}

fn neighbor_mean(
    g: &Graph<NodeLabel, EdgeLabel>,
    v: NodeIx,
    reference: Reference,
    xs: &[f64],
) -> Option<(f64, f64)> {
    let mut sum = 0.0;
    let mut weight = 0.0;
    if matches!(reference, Reference::Above | Reference::Both) {
        for &e in g.in_edges(v) {
            if let Some(entry) = g.edge(e) {
                sum += entry.label.weight * xs[entry.v];
                weight += entry.label.weight;
            }
        }
    }
    if matches!(reference, Reference::Below | Reference::Both) {
        for &e in g.out_edges(v) {
            if let Some(entry) = g.edge(e) {
                sum += entry.label.weight * xs[entry.w];
                weight += entry.label.weight;
            }
        }
    }
    (weight > 0.0).then(|| (sum / weight, weight))
}

/// Weighted least-squares fit of a non-decreasing sequence (pool adjacent violators).
pub fn isotonic_fit(targets: &[f64], weights: &[f64]) -> Vec<f64> {
    struct Block {
        weight: f64,
        weighted_sum: f64,
        len: usize,
    }

    impl Block {
        fn value(&self) -> f64 {
            self.weighted_sum / self.weight
        }
    }

    let mut blocks: Vec<Block> = Vec::with_capacity(targets.len());
    for (&t, &w) in targets.iter().zip(weights) {
        let w = if w > 0.0 && w.is_finite() { w } else { FREE_NODE_WEIGHT };
        let mut block = Block {
            weight: w,
            weighted_sum: w * t,
            len: 1,
        };
        while let Some(prev) = blocks.last() {
            if prev.value() <= block.value() {
                break;
            }
            let Some(prev) = blocks.pop() else {
                break;
            };
            block = Block {
                weight: prev.weight + block.weight,
                weighted_sum: prev.weighted_sum + block.weighted_sum,
                len: prev.len + block.len,
            };
        }
        blocks.push(block);
    }

    let mut out = Vec::with_capacity(targets.len());
    for block in blocks {
        let value = block.value();
        out.extend(std::iter::repeat_n(value, block.len));
    }
    out
}

/// Shifts everything so the real nodes' bounding box starts at the origin.
fn translate_to_origin(g: &mut Graph<NodeLabel, EdgeLabel>) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for (_, _, n) in g.nodes() {
        if n.dummy {
            continue;
        }
        if let Some(p) = n.top_left() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }
    g.for_each_node_mut(|_, n| {
        n.x = n.x.map(|x| x - min_x);
        n.y = n.y.map(|y| y - min_y);
    });
}
