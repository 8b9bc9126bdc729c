//! Read-only collaborators that supply the raw lists.

use docgraph_core::{DependencyEdge, Document};
use std::future::Future;

/// A rejected fetch. The only failure the controller surfaces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{origin} source failed: {message}")]
pub struct SourceError {
    /// Which list failed, e.g. `documents`.
    pub origin: String,
    pub message: String,
}

impl SourceError {
    pub fn new(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

pub trait DocumentSource {
    /// At most `limit` documents.
    fn list_documents(&self, limit: usize)
    -> impl Future<Output = Result<Vec<Document>, SourceError>>;
}

pub trait DependencySource {
    /// The full edge list; no pagination.
    fn list_dependencies(&self) -> impl Future<Output = Result<Vec<DependencyEdge>, SourceError>>;
}

/// In-memory source backed by owned lists.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub documents: Vec<Document>,
    pub dependencies: Vec<DependencyEdge>,
}

impl StaticSource {
    pub fn new(documents: Vec<Document>, dependencies: Vec<DependencyEdge>) -> Self {
        Self {
            documents,
            dependencies,
        }
    }
}

impl DocumentSource for StaticSource {
    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, SourceError> {
        Ok(self.documents.iter().take(limit).cloned().collect())
    }
}

impl DependencySource for StaticSource {
    async fn list_dependencies(&self) -> Result<Vec<DependencyEdge>, SourceError> {
        Ok(self.dependencies.clone())
    }
}
