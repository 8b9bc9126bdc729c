use docgraph::{
    DependencyEdge, DependencySource, Direction, DisplayState, Document, DocumentSource, Emphasis,
    GraphConfig, Level, LoadState, Notifier, RefreshController, SourceError, StaticSource, Theme,
    Viewport,
};
use futures::executor::block_on;
use std::cell::Cell;
use std::time::Duration;

fn fixture() -> StaticSource {
    StaticSource::new(
        vec![
            Document::new("a", "guide", "A"),
            Document::new("b", "guide", "B"),
            Document::new("c", "reference", "C"),
            Document::new("lonely", "", "Lonely"),
        ],
        vec![
            DependencyEdge::new("e1", "a", "b"),
            DependencyEdge::new("e2", "b", "c"),
        ],
    )
}

struct Failing;

impl DocumentSource for Failing {
    async fn list_documents(&self, _limit: usize) -> Result<Vec<Document>, SourceError> {
        Err(SourceError::new("documents", "offline"))
    }
}

impl DependencySource for Failing {
    async fn list_dependencies(&self) -> Result<Vec<DependencyEdge>, SourceError> {
        Err(SourceError::new("dependencies", "offline"))
    }
}

/// Counts fetches so tests can tell recomputes from refetches.
struct Counting {
    inner: StaticSource,
    calls: Cell<usize>,
}

impl DocumentSource for Counting {
    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.list_documents(limit).await
    }
}

impl DependencySource for Counting {
    async fn list_dependencies(&self) -> Result<Vec<DependencyEdge>, SourceError> {
        self.inner.list_dependencies().await
    }
}

fn loaded() -> RefreshController {
    let mut controller = RefreshController::new(GraphConfig::default());
    let source = fixture();
    block_on(controller.load(&source, &source));
    controller
}

#[test]
fn starts_idle_and_displays_loading() {
    let controller = RefreshController::new(GraphConfig::default());
    assert_eq!(controller.state(), &LoadState::Idle);
    assert_eq!(controller.display_state(), DisplayState::Loading);
    assert!(controller.view().is_none());
}

#[test]
fn successful_load_is_ready_and_requests_a_fit() {
    let mut controller = loaded();
    assert_eq!(controller.state(), &LoadState::Ready);
    let view = controller.view().unwrap();
    assert_eq!(view.node_count, 3);
    assert!(view.node("lonely").is_none());
    assert!(matches!(controller.display_state(), DisplayState::Graph(_)));

    let fit = controller.take_fit_request().unwrap();
    assert_eq!(fit.delay, Duration::from_millis(50));
    assert_eq!(fit.generation, 1);
    assert_eq!(controller.take_fit_request(), None);
}

#[test]
fn one_failed_source_falls_back_to_an_empty_list() {
    let notifier = Notifier::new();
    let mut controller =
        RefreshController::new(GraphConfig::default()).with_notifier(notifier.clone());
    let good = fixture();

    block_on(controller.load(&Failing, &good));
    assert_eq!(controller.state(), &LoadState::Ready);
    assert_eq!(controller.display_state(), DisplayState::Empty);

    block_on(controller.load(&good, &Failing));
    assert_eq!(controller.state(), &LoadState::Ready);
    assert_eq!(controller.display_state(), DisplayState::Empty);

    let levels: Vec<Level> = notifier.history().iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![Level::Warning, Level::Warning]);
}

#[test]
fn both_sources_failing_is_an_error_until_retry() {
    let notifier = Notifier::new();
    let mut controller =
        RefreshController::new(GraphConfig::default()).with_notifier(notifier.clone());

    block_on(controller.load(&Failing, &Failing));
    let LoadState::Error(message) = controller.state().clone() else {
        panic!("expected an error state");
    };
    assert!(message.contains("offline"));
    assert_eq!(controller.display_state(), DisplayState::Error(&message));
    assert!(controller.view().is_none());
    assert_eq!(notifier.history().last().map(|n| n.level), Some(Level::Error));

    let good = fixture();
    block_on(controller.load(&good, &good));
    assert_eq!(controller.state(), &LoadState::Ready);
}

#[test]
fn changes_recompute_without_refetching() {
    let source = Counting {
        inner: fixture(),
        calls: Cell::new(0),
    };
    let mut controller = RefreshController::new(GraphConfig::default());
    block_on(controller.load(&source, &source));
    assert_eq!(controller.take_fit_request().map(|f| f.generation), Some(1));

    let fit = controller.toggle_direction().unwrap();
    assert_eq!(fit.generation, 2);
    assert_eq!(controller.view().unwrap().direction, Direction::LR);

    assert!(controller.set_theme(Theme::Dark).is_some());
    assert_eq!(controller.view().unwrap().theme, Theme::Dark);

    assert!(controller.set_path_filter(Some("guide".to_string())).is_some());
    assert_eq!(controller.view().unwrap().node_count, 2);

    assert_eq!(source.calls.get(), 1);
    assert_eq!(controller.state(), &LoadState::Ready);
}

#[test]
fn unchanged_settings_do_not_rebuild() {
    let mut controller = loaded();
    controller.take_fit_request();
    assert_eq!(controller.set_direction(Direction::TB), None);
    assert_eq!(controller.set_theme(Theme::Light), None);
    assert_eq!(controller.set_path_filter(Some(String::new())), None);
    assert_eq!(controller.set_show_all_nodes(false), None);
    assert_eq!(controller.take_fit_request(), None);
}

#[test]
fn settings_before_load_apply_to_the_first_build() {
    let mut controller = RefreshController::new(GraphConfig::default());
    assert_eq!(controller.set_direction(Direction::LR), None);
    assert_eq!(controller.set_theme(Theme::Dark), None);

    let source = fixture();
    block_on(controller.load(&source, &source));
    let view = controller.view().unwrap();
    assert_eq!((view.direction, view.theme), (Direction::LR, Theme::Dark));
}

#[test]
fn viewport_and_selection_survive_recomputes() {
    let mut controller = loaded();
    let viewport = Viewport {
        x: 120.0,
        y: -40.0,
        zoom: 1.5,
    };
    controller.set_viewport(viewport);
    controller.select(Some("b".to_string()));

    controller.toggle_direction();
    controller.set_theme(Theme::Dark);

    assert_eq!(controller.viewport(), viewport);
    assert_eq!(controller.selection(), Some("b"));
    let view = controller.view().unwrap();
    let emphasis = |id: &str| view.node(id).and_then(|n| n.as_document()).unwrap().emphasis;
    assert_eq!(emphasis("b"), Emphasis::Focused);
    assert_eq!(emphasis("a"), Emphasis::Focused);
    assert_eq!(emphasis("c"), Emphasis::Focused);
}

#[test]
fn selection_does_not_request_a_fit() {
    let mut controller = loaded();
    controller.take_fit_request();
    controller.select(Some("c".to_string()));
    assert_eq!(controller.take_fit_request(), None);
    let view = controller.view().unwrap();
    assert_eq!(view.node("a").and_then(|n| n.as_document()).unwrap().emphasis, Emphasis::Dimmed);
}

#[test]
fn only_the_latest_load_wins() {
    let mut controller = RefreshController::new(GraphConfig::default());
    let stale = controller.begin_load();
    let latest = controller.begin_load();

    let source = fixture();
    assert!(!controller.finish_load(stale, Ok(source.documents.clone()), Ok(Vec::new())));
    assert_eq!(controller.state(), &LoadState::Loading);

    assert!(controller.finish_load(
        latest,
        Ok(source.documents.clone()),
        Ok(source.dependencies.clone())
    ));
    assert_eq!(controller.state(), &LoadState::Ready);
    assert!(!controller.finish_load(latest, Ok(Vec::new()), Ok(Vec::new())));
    assert_eq!(controller.view().unwrap().node_count, 3);
}

#[test]
fn document_limit_is_passed_to_the_source() {
    let config = GraphConfig {
        document_limit: 2,
        ..Default::default()
    };
    let mut controller = RefreshController::new(config);
    let source = fixture();
    block_on(controller.load(&source, &source));
    let view = controller.view().unwrap();
    assert!(view.node("c").is_none());
    assert_eq!(view.edge_count, 1);
}

#[test]
fn show_all_toggles_lift_the_caps() {
    let documents: Vec<Document> = (0..5)
        .map(|i| Document::new(format!("d{i}"), "x", ""))
        .collect();
    let dependencies: Vec<DependencyEdge> = (1..5)
        .map(|i| DependencyEdge::new(format!("e{i}"), "d0", format!("d{i}")))
        .collect();
    let source = StaticSource::new(documents, dependencies);
    let config = GraphConfig {
        max_nodes: 3,
        max_edges: 1,
        ..Default::default()
    };
    let mut controller = RefreshController::new(config);
    block_on(controller.load(&source, &source));

    let view = controller.view().unwrap();
    assert_eq!((view.node_count, view.total_nodes), (3, 5));
    assert_eq!((view.edge_count, view.total_edges), (1, 2));

    controller.set_show_all_nodes(true);
    controller.set_show_all_edges(true);
    let view = controller.view().unwrap();
    assert_eq!((view.node_count, view.total_nodes), (5, 5));
    assert_eq!((view.edge_count, view.total_edges), (4, 4));
}
