use std::collections::HashMap;
use std::sync::Arc;

use canvasflow_config::Condition;
use canvasflow_host_canvas::Snapshot;

use crate::error::ConditionError;
use crate::evaluator::{ConditionEvaluator, ConditionMatch};
use crate::selection::{SelectionEvaluator, when};

/// Dispatches conditions to evaluators by their `when` part.
///
/// Hosts register an evaluator per category of external state. A `when` with
/// no registered evaluator is reported as unsupported.
#[derive(Clone, Default)]
pub struct EvaluatorRegistry {
  evaluators: HashMap<String, Arc<dyn ConditionEvaluator>>,
}

impl EvaluatorRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a registry with the built-in selection evaluator.
  pub fn with_builtins() -> Self {
    let mut registry = Self::new();
    registry.register(when::SELECTED_ELEMENT, SelectionEvaluator);
    registry
  }

  /// Register an evaluator for a `when` category, replacing any previous one.
  pub fn register(&mut self, when: impl Into<String>, evaluator: impl ConditionEvaluator + 'static) {
    self.evaluators.insert(when.into(), Arc::new(evaluator));
  }

  /// Whether an evaluator is registered for `when`.
  pub fn supports(&self, when: &str) -> bool {
    self.evaluators.contains_key(when)
  }
}

impl ConditionEvaluator for EvaluatorRegistry {
  fn evaluate(
    &self,
    condition: &Condition,
    snapshot: &Snapshot,
  ) -> Result<ConditionMatch, ConditionError> {
    match self.evaluators.get(&condition.when) {
      Some(evaluator) => evaluator.evaluate(condition, snapshot),
      None => Err(ConditionError::unsupported(condition)),
    }
  }
}

impl std::fmt::Debug for EvaluatorRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut keys: Vec<&String> = self.evaluators.keys().collect();
    keys.sort();
    f.debug_struct("EvaluatorRegistry")
      .field("when", &keys)
      .finish()
  }
}
