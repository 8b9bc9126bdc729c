//! Label types carried through the layout pipeline and the public options/results.

use docgraph_graphlib::EdgeIx;
use serde::{Deserialize, Serialize};

/// Flow direction of ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum RankDir {
    /// Ranks stack vertically; nodes within a rank spread horizontally.
    #[default]
    TB,
    /// Ranks stack horizontally; nodes within a rank spread vertically.
    LR,
}

impl RankDir {
    pub fn toggled(self) -> Self {
        match self {
            Self::TB => Self::LR,
            Self::LR => Self::TB,
        }
    }
}

impl std::str::FromStr for RankDir {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "LR" => Ok(Self::LR),
            _ => Err(()),
        }
    }
}

/// Strategy used to pick the edges reversed before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acyclicer {
    /// Eades-Lin-Smyth greedy feedback arc set.
    #[default]
    Greedy,
    /// Back edges of a depth-first search in insertion order.
    Dfs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub rankdir: RankDir,
    /// Gap between adjacent nodes within a rank.
    pub nodesep: f64,
    /// Gap between adjacent rank bands.
    pub ranksep: f64,
    /// Gap reserved around long-edge bend points.
    pub edgesep: f64,
    pub acyclicer: Acyclicer,
    /// Upper bound on crossing-minimization sweeps.
    pub max_order_sweeps: usize,
    /// Alignment passes run by coordinate assignment.
    pub position_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 60.0,
            ranksep: 80.0,
            edgesep: 20.0,
            acyclicer: Acyclicer::Greedy,
            max_order_sweeps: 32,
            position_passes: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node label. `x`/`y` are the node's center once layout has run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: bool,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Top-left corner, available after layout.
    pub fn top_left(&self) -> Option<Point> {
        Some(Point::new(
            self.x? - self.width / 2.0,
            self.y? - self.height / 2.0,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub minlen: i32,
    pub weight: f64,
    pub reversed: bool,
    /// Edge of the caller's graph this working edge stands for.
    pub original: Option<EdgeIx>,
    /// Bend points between the endpoints, source to target.
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
            reversed: false,
            original: None,
            points: Vec::new(),
        }
    }
}

/// Input node for [`crate::layout_boxes`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// Input edge for [`crate::layout_boxes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: String,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub source: String,
    pub target: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
    pub width: f64,
    pub height: f64,
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
