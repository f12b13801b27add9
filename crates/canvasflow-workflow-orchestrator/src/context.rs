//! Per-run execution state.

use std::collections::HashMap;
use std::sync::Arc;

use canvasflow_action_runtime::ActionContext;
use canvasflow_host_canvas::{Canvas, Element, Snapshot};
use canvasflow_workflow::Graph;
use tokio_util::sync::CancellationToken;

use crate::result::{NodeOutcome, RunResult, RunStatus, SkipReason};

/// Mutable state of a single run.
///
/// Created at run start, owned by the engine for the run's duration and
/// consumed into a [`RunResult`] at the end. Never shared between runs.
pub struct ExecutionContext<'g> {
  run_id: String,
  graph: &'g Graph,
  snapshot: Arc<Snapshot>,
  trigger_id: Option<String>,
  activation: Option<Vec<Element>>,
  outcomes: Vec<(String, NodeOutcome)>,
  /// node_id -> position in `outcomes`.
  recorded: HashMap<String, usize>,
  cancel: CancellationToken,
}

impl<'g> ExecutionContext<'g> {
  pub fn new(
    run_id: impl Into<String>,
    graph: &'g Graph,
    snapshot: Snapshot,
    activation: Option<Vec<Element>>,
    cancel: CancellationToken,
  ) -> Self {
    Self {
      run_id: run_id.into(),
      graph,
      snapshot: Arc::new(snapshot),
      trigger_id: None,
      activation,
      outcomes: Vec::new(),
      recorded: HashMap::new(),
      cancel,
    }
  }

  pub fn run_id(&self) -> &str {
    &self.run_id
  }

  pub fn graph(&self) -> &'g Graph {
    self.graph
  }

  pub fn snapshot(&self) -> &Snapshot {
    &self.snapshot
  }

  /// Elements the current trigger fired on. Falls back to the whole
  /// selection when no activation inputs were given.
  pub fn activation_inputs(&self) -> &[Element] {
    self
      .activation
      .as_deref()
      .unwrap_or_else(|| self.snapshot.selection())
  }

  /// Switch to the activation inputs of another firing trigger.
  pub fn set_activation(&mut self, trigger_id: impl Into<String>, activation: Vec<Element>) {
    self.trigger_id = Some(trigger_id.into());
    self.activation = Some(activation);
  }

  /// Record a node's outcome. A second record for the same node replaces
  /// the first and keeps its position.
  pub fn record(&mut self, node_id: impl Into<String>, outcome: NodeOutcome) {
    let node_id = node_id.into();
    match self.recorded.get(&node_id) {
      Some(&i) => self.outcomes[i].1 = outcome,
      None => {
        self.recorded.insert(node_id.clone(), self.outcomes.len());
        self.outcomes.push((node_id, outcome));
      }
    }
  }

  pub fn outcome(&self, node_id: &str) -> Option<&NodeOutcome> {
    self.recorded.get(node_id).map(|&i| &self.outcomes[i].1)
  }

  pub fn outcomes(&self) -> &[(String, NodeOutcome)] {
    &self.outcomes
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancel.is_cancelled()
  }

  /// Signal cancellation. Observed before the next action starts.
  pub fn cancel(&self) {
    self.cancel.cancel();
  }

  /// Owned view of the context handed to an action.
  pub fn action_context(&self, node_id: &str, canvas: Arc<dyn Canvas>) -> ActionContext {
    ActionContext {
      run_id: self.run_id.clone(),
      node_id: node_id.to_string(),
      trigger_id: self.trigger_id.clone(),
      snapshot: self.snapshot.clone(),
      activation: self.activation_inputs().to_vec(),
      canvas,
      cancel: self.cancel.clone(),
    }
  }

  /// Status of a run that got past trigger evaluation.
  pub fn traversal_status(&self) -> RunStatus {
    let cancelled = self.outcomes.iter().any(|(_, outcome)| {
      matches!(
        outcome,
        NodeOutcome::Skipped {
          reason: SkipReason::Cancelled
        }
      )
    });

    if cancelled {
      RunStatus::Aborted
    } else if self.outcomes.iter().any(|(_, outcome)| outcome.is_failure()) {
      RunStatus::CompletedWithFailures
    } else {
      RunStatus::Completed
    }
  }

  pub fn into_result(self, status: RunStatus) -> RunResult {
    RunResult {
      run_id: self.run_id,
      status,
      outcomes: self.outcomes,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn snapshot() -> Snapshot {
    Snapshot::new(vec![Element::new("img-1", "image"), Element::new("txt-1", "text")])
  }

  #[test]
  fn test_activation_defaults_to_selection() {
    let graph = Graph::default();
    let mut ctx = ExecutionContext::new("r", &graph, snapshot(), None, CancellationToken::new());
    assert_eq!(ctx.activation_inputs().len(), 2);

    ctx.set_activation("t1", vec![Element::new("img-1", "image")]);
    assert_eq!(ctx.activation_inputs().len(), 1);
    assert_eq!(ctx.snapshot().len(), 2);
  }

  #[test]
  fn test_record_keeps_first_position() {
    let graph = Graph::default();
    let mut ctx = ExecutionContext::new("r", &graph, snapshot(), None, CancellationToken::new());

    ctx.record("a1", NodeOutcome::Success);
    ctx.record("a2", NodeOutcome::Success);
    ctx.record("a1", NodeOutcome::failure("late"));

    let ids: Vec<&str> = ctx.outcomes().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);
    assert_eq!(ctx.outcome("a1"), Some(&NodeOutcome::failure("late")));
  }

  #[test]
  fn test_traversal_status() {
    let graph = Graph::default();
    let mut ctx = ExecutionContext::new("r", &graph, snapshot(), None, CancellationToken::new());
    assert_eq!(ctx.traversal_status(), RunStatus::Completed);

    ctx.record("a1", NodeOutcome::failure("boom"));
    assert_eq!(ctx.traversal_status(), RunStatus::CompletedWithFailures);

    ctx.record("a2", NodeOutcome::skipped(SkipReason::Cancelled));
    assert_eq!(ctx.traversal_status(), RunStatus::Aborted);
  }

  #[test]
  fn test_cancel_is_visible() {
    let graph = Graph::default();
    let ctx = ExecutionContext::new("r", &graph, snapshot(), None, CancellationToken::new());
    assert!(!ctx.is_cancelled());
    ctx.cancel();
    assert!(ctx.is_cancelled());
  }
}
