use canvasflow_config::Condition;
use canvasflow_host_canvas::{Element, Snapshot};

use crate::error::ConditionError;

/// Outcome of evaluating a condition that was understood.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionMatch {
  pub fired: bool,
  /// Elements that satisfied the condition. Empty when not fired.
  pub activation: Vec<Element>,
}

impl ConditionMatch {
  pub fn fired(activation: Vec<Element>) -> Self {
    Self {
      fired: true,
      activation,
    }
  }

  pub fn not_fired() -> Self {
    Self::default()
  }
}

/// Decides whether a trigger condition holds for a snapshot.
///
/// Implementations must be deterministic and side-effect free.
pub trait ConditionEvaluator: Send + Sync {
  /// Evaluate a condition, returning the activation inputs when it fires.
  fn evaluate(
    &self,
    condition: &Condition,
    snapshot: &Snapshot,
  ) -> Result<ConditionMatch, ConditionError>;

  /// Whether the condition holds.
  fn matches(&self, condition: &Condition, snapshot: &Snapshot) -> Result<bool, ConditionError> {
    self.evaluate(condition, snapshot).map(|m| m.fired)
  }
}
