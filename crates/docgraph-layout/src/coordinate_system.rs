//! Coordinate system adjustment.
//!
//! The pipeline always works top-to-bottom. For left-to-right layouts node extents are swapped
//! before ranking and positioning, so the rank axis is measured with the node widths, and the
//! resulting coordinates are swapped back afterwards.

use crate::{EdgeLabel, NodeLabel, RankDir};
use docgraph_graphlib::Graph;

pub fn adjust(g: &mut Graph<NodeLabel, EdgeLabel>, rankdir: RankDir) {
    match rankdir {
        RankDir::LR => swap_width_height(g),
        RankDir::TB => {}
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel>, rankdir: RankDir) {
    match rankdir {
        RankDir::LR => {
            swap_xy(g);
            swap_width_height(g);
        }
        RankDir::TB => {}
    }
}

fn swap_width_height(g: &mut Graph<NodeLabel, EdgeLabel>) {
    g.for_each_node_mut(|_, n| {
        (n.width, n.height) = (n.height, n.width);
    });
}

fn swap_xy(g: &mut Graph<NodeLabel, EdgeLabel>) {
    g.for_each_node_mut(|_, n| {
        (n.x, n.y) = (n.y, n.x);
    });
}
