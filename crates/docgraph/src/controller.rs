//! Load state and recompute policy around [`docgraph_core::build`].
//!
//! Fetching happens only on mount or explicit retry. Direction, theme, filter and selection
//! changes recompute from the lists already held, keep the viewport untouched and, when the graph
//! was rebuilt, hand back a [`FitViewRequest`] for the host to honor after it re-renders.

use crate::notify::Notifier;
use crate::source::{DependencySource, DocumentSource, SourceError};
use docgraph_core::{
    DependencyEdge, Direction, Document, GraphConfig, GraphFilters, GraphView, Theme,
    apply_selection, build,
};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Both sources failed.
    Error(String),
}

/// What the host should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState<'a> {
    Loading,
    Error(&'a str),
    /// Loaded, but no edge survived filtering.
    Empty,
    Graph(&'a GraphView),
}

/// Ask the host to fit the viewport to the graph bounds after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitViewRequest {
    pub delay: Duration,
    /// Increases with every rebuild; hosts may drop requests older than the latest.
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Handed out by [`RefreshController::begin_load`]; only the latest ticket may finish a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct RefreshController {
    config: GraphConfig,
    direction: Direction,
    theme: Theme,
    filters: GraphFilters,
    selection: Option<String>,
    viewport: Viewport,
    state: LoadState,
    documents: Vec<Document>,
    edges: Vec<DependencyEdge>,
    view: Option<GraphView>,
    pending_fit: Option<FitViewRequest>,
    generation: u64,
    load_seq: u64,
    notifier: Option<Notifier>,
}

impl RefreshController {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn view(&self) -> Option<&GraphView> {
        self.view.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filters(&self) -> &GraphFilters {
        &self.filters
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        match (&self.state, &self.view) {
            (LoadState::Error(message), _) => DisplayState::Error(message),
            (LoadState::Ready, Some(view)) if !view.is_empty() => DisplayState::Graph(view),
            (LoadState::Ready, _) => DisplayState::Empty,
            (LoadState::Idle | LoadState::Loading, _) => DisplayState::Loading,
        }
    }

    /// Enters `Loading`. A ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.load_seq)
    }

    /// Applies the settled fetch results. Returns `false` and changes nothing when `ticket` is not
    /// the latest one.
    ///
    /// One failed list is replaced by an empty one; only a double failure ends in `Error`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        documents: Result<Vec<Document>, SourceError>,
        edges: Result<Vec<DependencyEdge>, SourceError>,
    ) -> bool {
        if ticket.0 != self.load_seq || self.state != LoadState::Loading {
            tracing::debug!(ticket = ticket.0, latest = self.load_seq, "ignoring stale load");
            return false;
        }

        match (documents, edges) {
            (Err(doc_err), Err(edge_err)) => {
                tracing::error!(documents = %doc_err, edges = %edge_err, "both sources failed");
                let message = format!("Failed to load the dependency graph: {doc_err}; {edge_err}");
                self.notify_error(&message);
                self.state = LoadState::Error(message);
                self.view = None;
                self.pending_fit = None;
                return true;
            }
            (documents, edges) => {
                self.documents = documents.unwrap_or_else(|err| {
                    tracing::warn!(
                        error = %err,
                        "document source failed; continuing without documents"
                    );
                    self.notify_warning(&err.to_string());
                    Vec::new()
                });
                self.edges = edges.unwrap_or_else(|err| {
                    tracing::warn!(
                        error = %err,
                        "dependency source failed; continuing without edges"
                    );
                    self.notify_warning(&err.to_string());
                    Vec::new()
                });
            }
        }

        self.state = LoadState::Ready;
        self.recompute();
        true
    }

    /// Fetches both lists concurrently and settles the load. Used for mount and retry alike.
    pub async fn load<D, E>(&mut self, documents: &D, dependencies: &E) -> &LoadState
    where
        D: DocumentSource,
        E: DependencySource,
    {
        let ticket = self.begin_load();
        let limit = self.config.document_limit;
        let (docs, deps) = futures::join!(
            documents.list_documents(limit),
            dependencies.list_dependencies()
        );
        self.finish_load(ticket, docs, deps);
        &self.state
    }

    pub fn set_direction(&mut self, direction: Direction) -> Option<FitViewRequest> {
        if self.direction == direction {
            return None;
        }
        self.direction = direction;
        self.refresh()
    }

    pub fn toggle_direction(&mut self) -> Option<FitViewRequest> {
        self.set_direction(self.direction.toggled())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Option<FitViewRequest> {
        if self.theme == theme {
            return None;
        }
        self.theme = theme;
        self.refresh()
    }

    pub fn set_path_filter(&mut self, prefix: Option<String>) -> Option<FitViewRequest> {
        let prefix = prefix.filter(|p| !p.is_empty());
        if self.filters.path_prefix == prefix {
            return None;
        }
        self.filters.path_prefix = prefix;
        self.refresh()
    }

    pub fn set_show_all_nodes(&mut self, show_all: bool) -> Option<FitViewRequest> {
        if self.filters.show_all_nodes == show_all {
            return None;
        }
        self.filters.show_all_nodes = show_all;
        self.refresh()
    }

    pub fn set_show_all_edges(&mut self, show_all: bool) -> Option<FitViewRequest> {
        if self.filters.show_all_edges == show_all {
            return None;
        }
        self.filters.show_all_edges = show_all;
        self.refresh()
    }

    pub fn set_filters(&mut self, filters: GraphFilters) -> Option<FitViewRequest> {
        if self.filters == filters {
            return None;
        }
        self.filters = filters;
        self.refresh()
    }

    /// Changes emphasis only; positions and viewport are left alone.
    pub fn select(&mut self, id: Option<String>) {
        self.selection = id;
        if let Some(view) = self.view.as_mut() {
            apply_selection(view, self.selection.as_deref());
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The fit request from the latest rebuild, if the host has not taken it yet.
    pub fn take_fit_request(&mut self) -> Option<FitViewRequest> {
        self.pending_fit.take()
    }

    fn refresh(&mut self) -> Option<FitViewRequest> {
        if self.state != LoadState::Ready {
            return None;
        }
        Some(self.recompute())
    }

    fn recompute(&mut self) -> FitViewRequest {
        let mut view = build(
            &self.documents,
            &self.edges,
            self.direction,
            self.theme,
            &self.filters,
            &self.config,
        );
        apply_selection(&mut view, self.selection.as_deref());
        tracing::debug!(
            nodes = view.node_count,
            total_nodes = view.total_nodes,
            edges = view.edge_count,
            total_edges = view.total_edges,
            "graph rebuilt"
        );
        self.view = Some(view);

        self.generation += 1;
        let request = FitViewRequest {
            delay: Duration::from_millis(self.config.fit_view_delay_ms),
            generation: self.generation,
        };
        self.pending_fit = Some(request);
        request
    }

    fn notify_warning(&self, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.warning(message);
        }
    }

    fn notify_error(&self, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.error(message);
        }
    }
}
