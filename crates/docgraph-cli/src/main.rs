use docgraph::{
    DependencyEdge, DependencySource, Direction, DisplayState, Document, DocumentSource,
    GraphConfig, GraphFilters, LoadState, RefreshController, SourceError, Theme,
};
use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(docgraph::Error),
    Load(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Load(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<docgraph::Error> for CliError {
    fn from(value: docgraph::Error) -> Self {
        Self::Config(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    documents: Option<String>,
    edges: Option<String>,
    bundle: Option<String>,
    config: Option<String>,
    direction: Direction,
    dark: bool,
    path_prefix: Option<String>,
    show_all_nodes: bool,
    show_all_edges: bool,
    select: Option<String>,
    pretty: bool,
}

/// `{ "documents": [...], "edges": [...] }`
#[derive(Debug, Default, Deserialize)]
struct Bundle {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    edges: Vec<DependencyEdge>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmptyOut {
    state: &'static str,
    node_count: usize,
    total_nodes: usize,
    edge_count: usize,
    total_edges: usize,
}

fn usage() -> &'static str {
    "docgraph-cli\n\
\n\
USAGE:\n\
  docgraph-cli [--bundle <path>|-] [--documents <path>] [--edges <path>] [--config <path>]\n\
               [--direction TB|LR] [--dark] [--path <prefix>] [--all-nodes] [--all-edges]\n\
               [--select <doc-id>] [--pretty]\n\
\n\
NOTES:\n\
  - A bundle is a JSON object with `documents` and `edges` arrays.\n\
  - Without --documents/--edges/--bundle, a bundle is read from stdin.\n\
  - --documents and --edges are fetched independently; if one of them fails the graph is\n\
    built from the other and a warning is logged.\n\
  - Logging goes to stderr; set RUST_LOG (default: warn).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = || it.next().cloned().ok_or(CliError::Usage(usage()));
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--documents" => args.documents = Some(value()?),
            "--edges" => args.edges = Some(value()?),
            "--bundle" => args.bundle = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--direction" => {
                args.direction = value()?
                    .parse::<Direction>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--dark" => args.dark = true,
            "--path" => args.path_prefix = Some(value()?),
            "--all-nodes" => args.show_all_nodes = true,
            "--all-edges" => args.show_all_edges = true,
            "--select" => args.select = Some(value()?),
            "--pretty" => args.pretty = true,
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.bundle.is_some() && (args.documents.is_some() || args.edges.is_some()) {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Reads one JSON array per list; an absent path yields an empty list.
struct FileSource {
    documents: Option<String>,
    edges: Option<String>,
}

fn read_list<T: serde::de::DeserializeOwned>(
    origin: &str,
    path: Option<&str>,
) -> Result<Vec<T>, SourceError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|err| SourceError::new(origin, format!("{path}: {err}")))?;
    serde_json::from_str(&text).map_err(|err| SourceError::new(origin, format!("{path}: {err}")))
}

impl DocumentSource for FileSource {
    async fn list_documents(&self, limit: usize) -> Result<Vec<Document>, SourceError> {
        let mut documents: Vec<Document> = read_list("documents", self.documents.as_deref())?;
        documents.truncate(limit);
        Ok(documents)
    }
}

impl DependencySource for FileSource {
    async fn list_dependencies(&self) -> Result<Vec<DependencyEdge>, SourceError> {
        read_list("dependencies", self.edges.as_deref())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match args.config.as_deref() {
        Some(path) => GraphConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GraphConfig::default(),
    };

    let mut controller = RefreshController::new(config);
    controller.set_direction(args.direction);
    controller.set_theme(Theme::from_dark(args.dark));
    controller.set_filters(GraphFilters {
        path_prefix: args.path_prefix,
        show_all_nodes: args.show_all_nodes,
        show_all_edges: args.show_all_edges,
    });
    controller.select(args.select);

    if args.documents.is_some() || args.edges.is_some() {
        let source = FileSource {
            documents: args.documents,
            edges: args.edges,
        };
        block_on(controller.load(&source, &source));
    } else {
        let bundle: Bundle = serde_json::from_str(&read_input(args.bundle.as_deref())?)?;
        let source = docgraph::StaticSource::new(bundle.documents, bundle.edges);
        block_on(controller.load(&source, &source));
    }

    match controller.display_state() {
        DisplayState::Graph(view) => write_json(view, args.pretty),
        DisplayState::Empty => {
            let counts = controller
                .view()
                .map(|v| (v.node_count, v.total_nodes, v.edge_count, v.total_edges));
            let (node_count, total_nodes, edge_count, total_edges) = counts.unwrap_or_default();
            write_json(
                &EmptyOut {
                    state: "empty",
                    node_count,
                    total_nodes,
                    edge_count,
                    total_edges,
                },
                args.pretty,
            )
        }
        DisplayState::Error(message) => Err(CliError::Load(message.to_string())),
        DisplayState::Loading => Err(CliError::Load(format!(
            "load did not settle (state: {:?})",
            controller.state()
        ))),
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
