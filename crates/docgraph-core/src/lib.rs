#![forbid(unsafe_code)]

//! Headless document dependency graph.
//!
//! Turns a flat document list plus "depends on" links into a positioned graph with one container
//! node per folder. See [`build`] for the pipeline.

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod curvature;
pub mod emphasis;
pub mod error;
pub mod group_key;
pub mod model;
pub mod tree;

pub use aggregate::{Aggregation, GroupBox, GroupStyle, MemberNode, aggregate};
pub use builder::{Selection, build, select};
pub use config::{GraphConfig, Palette};
pub use curvature::assign_curvature;
pub use emphasis::apply_selection;
pub use error::{Error, Result};
pub use group_key::{UNGROUPED, group_node_id, resolve_group_key};
pub use model::{
    DependencyEdge, Direction, Document, DocumentNodeData, Emphasis, Extent, GraphEdge,
    GraphFilters, GraphNode, GraphView, GroupNodeData, NodeData, Position, Theme,
};
pub use tree::{FolderTree, ItemKind, MoveError, TreeItem};
