use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use canvasflow_config::WorkflowDef;
use canvasflow_host_canvas::{CanvasDocument, InMemoryCanvas, Snapshot};
use canvasflow_workflow::Workflow;
use canvasflow_workflow_orchestrator::{EngineConfig, RunResult, WorkflowEngine};

/// Canvasflow - run trigger/action workflows against a canvas document
#[derive(Parser)]
#[command(name = "canvasflow")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a workflow against the document's current selection
  Run {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,

    /// Path to the canvas document (JSON). Read from stdin when omitted.
    #[arg(long)]
    document: Option<PathBuf>,

    /// Stop traversal at the first failed action
    #[arg(long)]
    halt_on_failure: bool,
  },

  /// Run a single action node, ignoring triggers and edges
  RunAction {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,

    /// The node ID to execute
    #[arg(long)]
    node: String,

    /// Path to the canvas document (JSON). Read from stdin when omitted.
    #[arg(long)]
    document: Option<PathBuf>,
  },

  /// Check a workflow for dangling references
  Validate {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,
  },
}

/// What `run` and `run-action` print.
#[derive(Serialize)]
struct RunOutput {
  result: RunResult,
  document: CanvasDocument,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canvasflow=info,warn")),
    )
    .with_writer(io::stderr)
    .with_target(false)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run {
      workflow_file,
      document,
      halt_on_failure,
    }) => {
      let config = EngineConfig { halt_on_failure };
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(run_workflow(workflow_file, document, config))?;
    }
    Some(Commands::RunAction {
      workflow_file,
      node,
      document,
    }) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(run_action(workflow_file, node, document))?;
    }
    Some(Commands::Validate { workflow_file }) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(validate(workflow_file))?;
    }
    None => {
      println!("canvasflow - use --help to see available commands");
    }
  }

  Ok(())
}

async fn run_workflow(
  workflow_file: PathBuf,
  document: Option<PathBuf>,
  config: EngineConfig,
) -> Result<()> {
  let workflow = load_workflow(&workflow_file).await?;
  let document = load_document(document.as_deref()).await?;

  let snapshot = Snapshot::new(document.selected());
  info!(
    workflow_id = %workflow.workflow_id,
    nodes = workflow.graph().len(),
    selection = snapshot.len(),
    "loaded workflow"
  );

  let canvas = Arc::new(InMemoryCanvas::new(document));
  let engine = WorkflowEngine::new(canvas.clone(), config);

  let cancel = cancel_on_ctrl_c();
  let result = engine
    .execute(workflow.graph(), snapshot, cancel)
    .await
    .context("workflow execution failed")?;

  print_output(result, &canvas).await
}

async fn run_action(
  workflow_file: PathBuf,
  node_id: String,
  document: Option<PathBuf>,
) -> Result<()> {
  let workflow = load_workflow(&workflow_file).await?;
  let document = load_document(document.as_deref()).await?;

  let snapshot = Snapshot::new(document.selected());
  let canvas = Arc::new(InMemoryCanvas::new(document));
  let engine = WorkflowEngine::new(canvas.clone(), EngineConfig::default());

  let result = engine
    .execute_node(workflow.graph(), &node_id, snapshot, cancel_on_ctrl_c())
    .await
    .with_context(|| format!("failed to run node '{}'", node_id))?;

  print_output(result, &canvas).await
}

async fn validate(workflow_file: PathBuf) -> Result<()> {
  let workflow = load_workflow(&workflow_file).await?;
  let graph = workflow.graph();

  println!("workflow: {} ({})", workflow.name, workflow.workflow_id);
  println!("nodes: {}", graph.len());
  println!("triggers: {}", graph.triggers().count());

  let dangling = graph.dangling_references();
  for (from, to) in &dangling {
    println!("dangling reference: {} -> {}", from, to);
  }

  if !dangling.is_empty() {
    bail!("workflow has {} dangling reference(s)", dangling.len());
  }
  Ok(())
}

async fn print_output(result: RunResult, canvas: &InMemoryCanvas) -> Result<()> {
  let output = RunOutput {
    result,
    document: canvas.document().await,
  };
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Cancellation token that fires on Ctrl-C. Checked between actions.
fn cancel_on_ctrl_c() -> CancellationToken {
  let cancel = CancellationToken::new();
  let token = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("interrupted, cancelling run");
      token.cancel();
    }
  });
  cancel
}

async fn load_workflow(path: &Path) -> Result<Workflow> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read workflow file: {}", path.display()))?;

  let def: WorkflowDef = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse workflow file: {}", path.display()))?;

  Workflow::from_def(def)
    .with_context(|| format!("invalid workflow: {}", path.display()))
}

async fn load_document(path: Option<&Path>) -> Result<CanvasDocument> {
  match path {
    Some(path) => {
      let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read document file: {}", path.display()))?;
      parse_document(&content)
        .with_context(|| format!("failed to parse document file: {}", path.display()))
    }
    None => read_document_from_stdin(),
  }
}

fn read_document_from_stdin() -> Result<CanvasDocument> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    // No stdin pipe, use an empty canvas
    Ok(CanvasDocument::default())
  } else {
    let mut input = String::new();
    io::stdin()
      .read_to_string(&mut input)
      .context("failed to read document from stdin")?;
    parse_document(&input).context("failed to parse document JSON from stdin")
  }
}

fn parse_document(input: &str) -> Result<CanvasDocument> {
  if input.trim().is_empty() {
    return Ok(CanvasDocument::default());
  }
  Ok(serde_json::from_str(input)?)
}
