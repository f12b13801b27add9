//! Workflow runner with channel-based triggering.
//!
//! The `WorkflowRunner` owns an mpsc channel of run requests and executes them
//! one after another, so runs fired by rapid successive selection changes are
//! queued instead of interleaving. Each run gets its own execution context.

use std::sync::Arc;

use canvasflow_host_canvas::Snapshot;
use canvasflow_workflow::Workflow;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::engine::WorkflowEngine;
use crate::error::ExecutionError;
use crate::events::{ExecutionNotifier, NoopNotifier};
use crate::result::RunResult;

type RunReply = oneshot::Sender<Result<RunResult, ExecutionError>>;

/// A queued run.
struct RunRequest {
  snapshot: Snapshot,
  reply: Option<RunReply>,
}

/// Cloneable handle for queueing runs on a [`WorkflowRunner`].
///
/// This can be given to selection listeners, UI handlers, etc.
#[derive(Clone)]
pub struct RunnerHandle {
  sender: mpsc::Sender<RunRequest>,
}

impl RunnerHandle {
  /// Queue a run and get a receiver for its result.
  pub async fn submit(
    &self,
    snapshot: Snapshot,
  ) -> Result<oneshot::Receiver<Result<RunResult, ExecutionError>>, ExecutionError> {
    let (reply, receiver) = oneshot::channel();
    self
      .sender
      .send(RunRequest {
        snapshot,
        reply: Some(reply),
      })
      .await
      .map_err(|_| ExecutionError::RunnerClosed)?;
    Ok(receiver)
  }

  /// Queue a run without waiting for its result.
  pub async fn trigger(&self, snapshot: Snapshot) -> Result<(), ExecutionError> {
    self
      .sender
      .send(RunRequest {
        snapshot,
        reply: None,
      })
      .await
      .map_err(|_| ExecutionError::RunnerClosed)
  }

  pub fn is_closed(&self) -> bool {
    self.sender.is_closed()
  }
}

/// A runner that executes a workflow in response to selection snapshots.
///
/// # Usage
///
/// ```ignore
/// let runner = WorkflowRunner::new(workflow, Arc::new(engine));
///
/// // Handle for external triggers (selection listeners, UI, etc.)
/// let handle = runner.handle();
///
/// // Start the execution loop
/// let cancel = CancellationToken::new();
/// tokio::spawn(runner.start(cancel));
///
/// let result = handle.submit(snapshot).await?.await;
/// ```
pub struct WorkflowRunner<N: ExecutionNotifier = NoopNotifier> {
  sender: mpsc::Sender<RunRequest>,
  receiver: mpsc::Receiver<RunRequest>,
  workflow: Arc<Workflow>,
  engine: Arc<WorkflowEngine<N>>,
}

impl<N: ExecutionNotifier> WorkflowRunner<N> {
  /// Create a new workflow runner.
  pub fn new(workflow: Workflow, engine: Arc<WorkflowEngine<N>>) -> Self {
    Self::with_buffer_size(workflow, engine, 100)
  }

  /// Create a new workflow runner with a custom queue size.
  pub fn with_buffer_size(
    workflow: Workflow,
    engine: Arc<WorkflowEngine<N>>,
    buffer_size: usize,
  ) -> Self {
    let (sender, receiver) = mpsc::channel(buffer_size);
    Self {
      sender,
      receiver,
      workflow: Arc::new(workflow),
      engine,
    }
  }

  /// Get a handle for queueing runs.
  pub fn handle(&self) -> RunnerHandle {
    RunnerHandle {
      sender: self.sender.clone(),
    }
  }

  /// Start the execution loop.
  ///
  /// Runs until the cancellation token is triggered or every handle has been
  /// dropped. Queued runs execute strictly one at a time.
  pub async fn start(mut self, cancel: CancellationToken) -> Result<(), ExecutionError> {
    info!(
      workflow_id = %self.workflow.workflow_id,
      workflow_name = %self.workflow.name,
      "starting workflow runner"
    );

    // Only handles keep the channel open from here on.
    drop(self.sender);

    loop {
      tokio::select! {
        _ = cancel.cancelled() => {
          info!(workflow_id = %self.workflow.workflow_id, "workflow runner cancelled");
          break;
        }
        request = self.receiver.recv() => {
          let Some(request) = request else {
            info!(workflow_id = %self.workflow.workflow_id, "workflow runner channel closed");
            break;
          };

          // Cancelling the runner cancels the run in flight too.
          let run_cancel = cancel.child_token();
          let result = self
            .engine
            .execute(self.workflow.graph(), request.snapshot, run_cancel)
            .await;

          match &result {
            Ok(run) => info!(
              workflow_id = %self.workflow.workflow_id,
              run_id = %run.run_id,
              status = %run.status,
              "workflow run finished"
            ),
            Err(e) => error!(
              workflow_id = %self.workflow.workflow_id,
              error = %e,
              "workflow run aborted"
            ),
          }

          if let Some(reply) = request.reply
            && reply.send(result).is_err()
          {
            warn!(workflow_id = %self.workflow.workflow_id, "run result receiver dropped");
          }
        }
      }
    }

    Ok(())
  }

  /// Execute a single run directly (without the queue).
  pub async fn execute_once(
    &self,
    snapshot: Snapshot,
    cancel: CancellationToken,
  ) -> Result<RunResult, ExecutionError> {
    self
      .engine
      .execute(self.workflow.graph(), snapshot, cancel)
      .await
  }

  pub fn workflow(&self) -> &Workflow {
    &self.workflow
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::EngineConfig;
  use crate::result::RunStatus;
  use canvasflow_config::Condition;
  use canvasflow_host_canvas::{CanvasDocument, Element, InMemoryCanvas};
  use canvasflow_workflow::{Graph, Node};
  use std::time::Duration;

  fn create_test_workflow() -> Workflow {
    Workflow {
      workflow_id: "test-workflow".to_string(),
      name: "Test Workflow".to_string(),
      graph: Graph::new(vec![
        Node::trigger(
          "t1",
          Condition::new("selected_element", "contains", "image"),
        )
        .with_next(["a1"]),
        Node::action("a1", "log"),
      ])
      .unwrap(),
    }
  }

  fn create_test_runner() -> WorkflowRunner {
    let canvas = Arc::new(InMemoryCanvas::new(CanvasDocument::default()));
    let engine = WorkflowEngine::new(canvas, EngineConfig::default());
    WorkflowRunner::new(create_test_workflow(), Arc::new(engine))
  }

  fn image_snapshot() -> Snapshot {
    Snapshot::new(vec![Element::new("img-1", "image")])
  }

  #[tokio::test]
  async fn test_runner_creation() {
    let runner = create_test_runner();
    assert_eq!(runner.workflow().workflow_id, "test-workflow");
    assert!(!runner.handle().is_closed());
  }

  #[tokio::test]
  async fn test_submit_returns_result() {
    let runner = create_test_runner();
    let handle = runner.handle();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(runner.start(cancel.clone()));

    let first = handle.submit(image_snapshot()).await.unwrap();
    let second = handle.submit(Snapshot::default()).await.unwrap();

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_eq!(first.status, RunStatus::Completed);
    assert_eq!(first.node_ids(), vec!["a1"]);
    assert_eq!(second.status, RunStatus::NoTriggerFired);
    assert_ne!(first.run_id, second.run_id);

    cancel.cancel();
    assert!(task.await.unwrap().is_ok());
  }

  #[tokio::test]
  async fn test_stops_when_handles_dropped() {
    let runner = create_test_runner();
    let handle = runner.handle();
    let task = tokio::spawn(runner.start(CancellationToken::new()));

    handle.trigger(image_snapshot()).await.unwrap();
    drop(handle);

    let result = tokio::time::timeout(Duration::from_secs(5), task).await;
    assert!(result.unwrap().unwrap().is_ok());
  }

  #[tokio::test]
  async fn test_cancellation() {
    let runner = create_test_runner();
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    let handle = tokio::spawn(async move { runner.start(cancel_clone).await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    cancel.cancel();

    let result = handle.await.unwrap();
    assert!(result.is_ok());
  }

  #[tokio::test]
  async fn test_execute_once() {
    let runner = create_test_runner();
    let result = runner
      .execute_once(image_snapshot(), CancellationToken::new())
      .await
      .unwrap();
    assert_eq!(result.status, RunStatus::Completed);
  }
}
