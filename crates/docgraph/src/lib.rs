#![forbid(unsafe_code)]

//! `docgraph` turns documents and the links between them into a positioned dependency graph,
//! grouped by folder, ready for an interactive canvas.
//!
//! The pure pipeline lives in `docgraph-core` and is re-exported here. This crate adds the
//! pieces that hold state over time:
//!
//! - [`controller::RefreshController`]: load state, partial-failure policy, recompute on
//!   direction/theme/filter changes,
//! - [`source`]: the traits the controller fetches through,
//! - [`notify::Notifier`]: injectable publish/subscribe notifications.

pub use docgraph_core::*;
pub use docgraph_layout as layout;

pub mod controller;
pub mod notify;
pub mod source;

pub use controller::{
    DisplayState, FitViewRequest, LoadState, LoadTicket, RefreshController, Viewport,
};
pub use notify::{Level, Notification, Notifier, SubscriptionId};
pub use source::{DependencySource, DocumentSource, SourceError, StaticSource};
