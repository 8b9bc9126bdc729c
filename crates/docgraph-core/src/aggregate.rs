//! Folder groups around laid-out document boxes.
//!
//! Groups exist only for keys that own at least one node. Each group box is the union of its
//! members' boxes grown by `padding` on every side plus `header` on the top edge; members are
//! re-expressed relative to the group's top-left corner.

use crate::group_key::group_node_id;
use docgraph_layout::PlacedNode;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStyle {
    pub padding: f64,
    pub header: f64,
}

impl Default for GroupStyle {
    fn default() -> Self {
        Self {
            padding: 20.0,
            header: 28.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    /// `group:` + key.
    pub id: String,
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Position of the key in sorted order; selects the palette entry.
    pub color_index: usize,
    pub color: String,
    pub member_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberNode {
    pub id: String,
    pub group_id: String,
    /// Relative to the group's top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    /// Sorted by key.
    pub groups: Vec<GroupBox>,
    /// In input order.
    pub members: Vec<MemberNode>,
}

impl Aggregation {
    pub fn group(&self, id: &str) -> Option<&GroupBox> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// Palette entry for a sorted group position, cycling when there are more groups than colors.
pub fn color_at(palette: &[String], index: usize) -> Option<&str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()].as_str())
}

pub fn aggregate<'a, F>(
    nodes: &'a [PlacedNode],
    group_key_of: F,
    style: &GroupStyle,
    palette: &[String],
) -> Aggregation
where
    F: Fn(&'a PlacedNode) -> &'a str,
{
    struct Extent {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        count: usize,
    }

    let mut extents: IndexMap<&str, Extent> = IndexMap::new();
    for node in nodes {
        let key = group_key_of(node);
        let e = extents.entry(key).or_insert_with(|| Extent {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
            count: 0,
        });
        e.min_x = e.min_x.min(node.x);
        e.min_y = e.min_y.min(node.y);
        e.max_x = e.max_x.max(node.x + node.width);
        e.max_y = e.max_y.max(node.y + node.height);
        e.count += 1;
    }
    extents.sort_keys();

    let mut groups = Vec::with_capacity(extents.len());
    for (index, (key, e)) in extents.iter().enumerate() {
        let x = e.min_x - style.padding;
        let y = e.min_y - style.padding - style.header;
        groups.push(GroupBox {
            id: group_node_id(key),
            key: key.to_string(),
            x,
            y,
            width: e.max_x + style.padding - x,
            height: e.max_y + style.padding - y,
            color_index: index,
            color: color_at(palette, index).unwrap_or_default().to_string(),
            member_count: e.count,
        });
    }

    let members = nodes
        .iter()
        .filter_map(|node| {
            let index = extents.get_index_of(group_key_of(node))?;
            let group = &groups[index];
            Some(MemberNode {
                id: node.id.clone(),
                group_id: group.id.clone(),
                x: node.x - group.x,
                y: node.y - group.y,
                width: node.width,
                height: node.height,
            })
        })
        .collect();

    Aggregation { groups, members }
}
