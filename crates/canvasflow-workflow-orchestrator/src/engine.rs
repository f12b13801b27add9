//! Workflow execution engine.
//!
//! The [`WorkflowEngine`] evaluates every trigger of a graph against a
//! selection snapshot, then walks the graph from each firing trigger and runs
//! the action nodes it reaches, one at a time.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use canvasflow_action_runtime::{ActionExecutor, ActionInvocation, ActionRegistry};
use canvasflow_condition::{ConditionError, ConditionEvaluator, EvaluatorRegistry};
use canvasflow_host_canvas::{Canvas, Element, Snapshot};
use canvasflow_workflow::{ActionSpec, Graph, Node, NodeKind};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::config::EngineConfig;
use crate::context::ExecutionContext;
use crate::error::ExecutionError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::result::{NodeOutcome, RunResult, RunStatus, SkipReason};

/// A trigger whose condition held, with the elements it fired on.
struct FiredTrigger<'g> {
  node: &'g Node,
  activation: Vec<Element>,
}

/// Traversal state shared by every trigger walk of a run.
#[derive(Default)]
struct Walk {
  /// Node ids already reached during this run.
  visited: HashSet<String>,
  /// Once set, every action reached is skipped for this reason.
  stopped: Option<SkipReason>,
}

/// The workflow execution engine.
///
/// Generic over `N: ExecutionNotifier` to allow different notification strategies.
/// Use `WorkflowEngine::new()` for an engine with no-op notifications, or
/// `with_notifier()` to provide a custom notifier.
pub struct WorkflowEngine<N: ExecutionNotifier = NoopNotifier> {
  evaluator: Arc<dyn ConditionEvaluator>,
  executor: ActionExecutor,
  canvas: Arc<dyn Canvas>,
  config: EngineConfig,
  notifier: N,
}

impl WorkflowEngine<NoopNotifier> {
  /// Create an engine acting on `canvas` with the built-in condition
  /// evaluators and actions.
  pub fn new(canvas: Arc<dyn Canvas>, config: EngineConfig) -> Self {
    Self {
      evaluator: Arc::new(EvaluatorRegistry::with_builtins()),
      executor: ActionExecutor::new(ActionRegistry::with_builtins()),
      canvas,
      config,
      notifier: NoopNotifier,
    }
  }
}

impl<N: ExecutionNotifier> WorkflowEngine<N> {
  /// Replace the condition evaluator.
  pub fn with_evaluator(mut self, evaluator: impl ConditionEvaluator + 'static) -> Self {
    self.evaluator = Arc::new(evaluator);
    self
  }

  /// Replace the action registry.
  pub fn with_actions(mut self, registry: ActionRegistry) -> Self {
    self.executor = ActionExecutor::new(registry);
    self
  }

  /// Replace the notifier.
  pub fn with_notifier<M: ExecutionNotifier>(self, notifier: M) -> WorkflowEngine<M> {
    WorkflowEngine {
      evaluator: self.evaluator,
      executor: self.executor,
      canvas: self.canvas,
      config: self.config,
      notifier,
    }
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub fn canvas(&self) -> &Arc<dyn Canvas> {
    &self.canvas
  }

  /// Execute a run of `graph` against `snapshot`.
  ///
  /// Only a fatal condition evaluator error is returned as `Err`; everything
  /// else that goes wrong on a node is recorded in the [`RunResult`].
  #[instrument(name = "workflow_execute", skip(self, graph, snapshot, cancel))]
  pub async fn execute(
    &self,
    graph: &Graph,
    snapshot: Snapshot,
    cancel: CancellationToken,
  ) -> Result<RunResult, ExecutionError> {
    let run_id = uuid::Uuid::new_v4().to_string();

    info!(
      run_id = %run_id,
      nodes = graph.len(),
      selection = snapshot.len(),
      "run_started"
    );
    self.notifier.notify(ExecutionEvent::RunStarted {
      run_id: run_id.clone(),
    });

    let mut ctx = ExecutionContext::new(run_id.clone(), graph, snapshot, None, cancel);

    let fired = match self.evaluate_triggers(&mut ctx) {
      Ok(fired) => fired,
      Err(e) => {
        error!(run_id = %run_id, error = %e, "run_aborted");
        self.notifier.notify(ExecutionEvent::RunAborted {
          run_id,
          error: e.to_string(),
        });
        return Err(e);
      }
    };

    let status = if fired.is_empty() {
      RunStatus::NoTriggerFired
    } else {
      let mut walk = Walk::default();
      for trigger in fired {
        ctx.set_activation(&trigger.node.id, trigger.activation);
        self.walk(&mut ctx, trigger.node, &mut walk).await;
      }
      ctx.traversal_status()
    };

    info!(
      run_id = %run_id,
      status = %status,
      outcomes = ctx.outcomes().len(),
      "run_completed"
    );
    self
      .notifier
      .notify(ExecutionEvent::RunCompleted { run_id, status });

    Ok(ctx.into_result(status))
  }

  /// Execute a single action node in isolation.
  ///
  /// This is for debugging: no trigger is evaluated, no edge is followed, and
  /// the whole selection is used as activation inputs.
  pub async fn execute_node(
    &self,
    graph: &Graph,
    node_id: &str,
    snapshot: Snapshot,
    cancel: CancellationToken,
  ) -> Result<RunResult, ExecutionError> {
    let node = graph
      .get(node_id)
      .ok_or_else(|| ExecutionError::NodeNotFound {
        node_id: node_id.to_string(),
      })?;
    let NodeKind::Action(spec) = &node.kind else {
      return Err(ExecutionError::NotAnAction {
        node_id: node_id.to_string(),
      });
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    let mut ctx = ExecutionContext::new(run_id, graph, snapshot, None, cancel);

    let outcome = if ctx.is_cancelled() {
      NodeOutcome::skipped(SkipReason::Cancelled)
    } else {
      self.run_action(&ctx, node, spec).await
    };
    ctx.record(&node.id, outcome);

    let status = ctx.traversal_status();
    Ok(ctx.into_result(status))
  }

  /// Evaluate every trigger in authored order.
  fn evaluate_triggers<'g>(
    &self,
    ctx: &mut ExecutionContext<'g>,
  ) -> Result<Vec<FiredTrigger<'g>>, ExecutionError> {
    let graph = ctx.graph();
    let mut fired = Vec::new();

    for node in graph.triggers() {
      let NodeKind::Trigger(spec) = &node.kind else {
        continue;
      };

      // A panicking evaluator is a bug in the condition, same as Fatal.
      let evaluated = panic::catch_unwind(AssertUnwindSafe(|| {
        self.evaluator.evaluate(&spec.condition, ctx.snapshot())
      }))
      .unwrap_or_else(|payload| {
        Err(ConditionError::fatal(format!(
          "evaluator panicked: {}",
          panic_message(payload.as_ref())
        )))
      });

      match evaluated {
        Ok(result) => {
          info!(
            run_id = %ctx.run_id(),
            trigger_id = %node.id,
            condition = %spec.condition,
            fired = result.fired,
            "trigger_evaluated"
          );
          self.notifier.notify(ExecutionEvent::TriggerEvaluated {
            run_id: ctx.run_id().to_string(),
            trigger_id: node.id.clone(),
            fired: result.fired,
          });
          if result.fired {
            fired.push(FiredTrigger {
              node,
              activation: result.activation,
            });
          }
        }
        Err(e @ ConditionError::Unsupported { .. }) => {
          warn!(
            run_id = %ctx.run_id(),
            trigger_id = %node.id,
            error = %e,
            "trigger condition unsupported"
          );
          self.skip(
            ctx,
            &node.id,
            SkipReason::UnsupportedCondition {
              message: e.to_string(),
            },
          );
        }
        Err(ConditionError::Fatal { message }) => {
          return Err(ExecutionError::EvaluatorFatal {
            trigger_id: node.id.clone(),
            message,
          });
        }
      }
    }

    Ok(fired)
  }

  /// Depth-first walk from a trigger's `next` ids, in `next` order.
  ///
  /// `walk.visited` spans the whole run, so each node is handled at most once
  /// no matter how many triggers or paths reach it, and cycles terminate.
  async fn walk<'g>(&self, ctx: &mut ExecutionContext<'g>, trigger: &'g Node, walk: &mut Walk) {
    let graph = ctx.graph();
    let mut stack: Vec<&'g str> = trigger.next.iter().rev().map(String::as_str).collect();

    while let Some(node_id) = stack.pop() {
      if !walk.visited.insert(node_id.to_string()) {
        continue;
      }

      let Some(node) = graph.get(node_id) else {
        warn!(run_id = %ctx.run_id(), node_id, "dangling reference");
        self.skip(ctx, node_id, SkipReason::DanglingReference);
        continue;
      };

      match &node.kind {
        NodeKind::Action(spec) => {
          if walk.stopped.is_none() && ctx.is_cancelled() {
            warn!(run_id = %ctx.run_id(), node_id, "run cancelled");
            walk.stopped = Some(SkipReason::Cancelled);
          }

          if let Some(reason) = walk.stopped.clone() {
            self.skip(ctx, node_id, reason);
          } else {
            let outcome = self.run_action(ctx, node, spec).await;
            if outcome.is_failure() && self.config.halt_on_failure {
              warn!(run_id = %ctx.run_id(), node_id, "halting traversal on failure");
              walk.stopped = Some(SkipReason::Halted);
            }
            ctx.record(node_id, outcome);
          }
        }
        NodeKind::Trigger(_) => {
          // Triggers are evaluated on their own, never stepped into.
          debug!(run_id = %ctx.run_id(), node_id, "edge into trigger ignored");
          continue;
        }
        NodeKind::Unknown => {
          let error = "unknown node kind".to_string();
          error!(run_id = %ctx.run_id(), node_id, "{}", error);
          self.notifier.notify(ExecutionEvent::NodeFailed {
            run_id: ctx.run_id().to_string(),
            node_id: node_id.to_string(),
            error: error.clone(),
          });
          ctx.record(node_id, NodeOutcome::failure(error));
          if walk.stopped.is_none() && self.config.halt_on_failure {
            warn!(run_id = %ctx.run_id(), node_id, "halting traversal on failure");
            walk.stopped = Some(SkipReason::Halted);
          }
          continue;
        }
      }

      stack.extend(node.next.iter().rev().map(String::as_str));
    }
  }

  /// Run one action and turn its result into an outcome.
  async fn run_action(
    &self,
    ctx: &ExecutionContext<'_>,
    node: &Node,
    spec: &ActionSpec,
  ) -> NodeOutcome {
    self.notifier.notify(ExecutionEvent::NodeStarted {
      run_id: ctx.run_id().to_string(),
      node_id: node.id.clone(),
    });

    let action_ctx = ctx.action_context(&node.id, self.canvas.clone());
    let invocation = ActionInvocation {
      action: &spec.action,
      inputs: &spec.inputs,
      timeout_ms: spec.timeout_ms,
    };

    match self.executor.execute(invocation, &action_ctx).await {
      Ok(()) => {
        self.notifier.notify(ExecutionEvent::NodeCompleted {
          run_id: ctx.run_id().to_string(),
          node_id: node.id.clone(),
        });
        NodeOutcome::Success
      }
      Err(e) => {
        self.notifier.notify(ExecutionEvent::NodeFailed {
          run_id: ctx.run_id().to_string(),
          node_id: node.id.clone(),
          error: e.to_string(),
        });
        NodeOutcome::failure(e.to_string())
      }
    }
  }

  fn skip(&self, ctx: &mut ExecutionContext<'_>, node_id: &str, reason: SkipReason) {
    debug!(run_id = %ctx.run_id(), node_id, reason = %reason, "node skipped");
    self.notifier.notify(ExecutionEvent::NodeSkipped {
      run_id: ctx.run_id().to_string(),
      node_id: node_id.to_string(),
      reason: reason.clone(),
    });
    ctx.record(node_id, NodeOutcome::skipped(reason));
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    s.to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "unknown panic".to_string()
  }
}
