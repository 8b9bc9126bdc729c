//! Input records, the derived graph view and the knobs that shape it.

use serde::{Deserialize, Serialize};

pub use docgraph_layout::Point as Position;
pub use docgraph_layout::RankDir as Direction;

/// A document as listed by the document store. Never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Slash-delimited folder path; empty means the root.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: title.into(),
            keywords: Vec::new(),
        }
    }
}

/// A directed "depends on" reference between two documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub id: String,
    pub from_doc_id: String,
    pub to_doc_id: String,
    #[serde(default)]
    pub link_text: Option<String>,
}

impl DependencyEdge {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_doc_id: from.into(),
            to_doc_id: to.into(),
            link_text: None,
        }
    }

    pub fn with_link_text(mut self, text: impl Into<String>) -> Self {
        self.link_text = Some(text.into());
        self
    }

    pub fn is_self_edge(&self) -> bool {
        self.from_doc_id == self.to_doc_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Host-controlled filters. An empty `path_prefix` is the same as none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphFilters {
    pub path_prefix: Option<String>,
    pub show_all_nodes: bool,
    pub show_all_edges: bool,
}

impl GraphFilters {
    pub fn active_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref().filter(|p| !p.is_empty())
    }
}

/// Visual emphasis of a document node relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emphasis {
    #[default]
    Normal,
    Focused,
    Dimmed,
}

/// Child nodes are confined to their parent's box when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extent {
    Parent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNodeData {
    pub label: String,
    pub path: String,
    pub keywords: Vec<String>,
    pub group_key: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNodeData {
    pub label: String,
    pub group_key: String,
    pub color: String,
    pub member_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeData {
    Document(DocumentNodeData),
    Group(GroupNodeData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    /// Top-left corner; relative to the parent group for document nodes.
    pub position: Position,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    pub data: NodeData,
}

impl GraphNode {
    pub fn is_group(&self) -> bool {
        matches!(self.data, NodeData::Group(_))
    }

    pub fn as_document(&self) -> Option<&DocumentNodeData> {
        match &self.data {
            NodeData::Document(d) => Some(d),
            NodeData::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNodeData> {
        match &self.data {
            NodeData::Group(g) => Some(g),
            NodeData::Document(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Signed bend relative to the edge's own direction; `0` draws a straight line.
    pub curvature: f64,
    /// Bend points of multi-rank edges, in absolute coordinates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Position>,
}

/// Everything a rendering surface needs for one frame. Group nodes come before documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    pub direction: Direction,
    pub theme: Theme,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Document nodes shown.
    pub node_count: usize,
    /// Document nodes eligible before the node cap.
    pub total_nodes: usize,
    pub edge_count: usize,
    /// Edges eligible before the edge cap.
    pub total_edges: usize,
}

impl GraphView {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn document_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| !n.is_group())
    }

    pub fn group_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.is_group())
    }

    /// No edge survived filtering.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Absolute top-left of a node, resolving group-relative document positions.
    pub fn absolute_position(&self, id: &str) -> Option<Position> {
        let node = self.node(id)?;
        let mut pos = node.position;
        if let Some(parent) = node.parent.as_deref() {
            let group = self.node(parent)?;
            pos.x += group.position.x;
            pos.y += group.position.y;
        }
        Some(pos)
    }
}
