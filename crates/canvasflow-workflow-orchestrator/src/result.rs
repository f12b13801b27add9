//! Run result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a node was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SkipReason {
  /// The run was cancelled before the node was reached.
  Cancelled,
  /// An earlier action failed with `halt_on_failure` set.
  Halted,
  /// A `next` id did not resolve to a node.
  DanglingReference,
  /// The trigger's condition was not understood by the evaluator.
  UnsupportedCondition { message: String },
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Cancelled => f.write_str("cancelled"),
      SkipReason::Halted => f.write_str("halted"),
      SkipReason::DanglingReference => f.write_str("dangling-reference"),
      SkipReason::UnsupportedCondition { message } => {
        write!(f, "unsupported-condition: {}", message)
      }
    }
  }
}

/// Recorded outcome of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NodeOutcome {
  Success,
  Failure { reason: String },
  Skipped { reason: SkipReason },
}

impl NodeOutcome {
  pub fn failure(reason: impl Into<String>) -> Self {
    Self::Failure {
      reason: reason.into(),
    }
  }

  pub fn skipped(reason: SkipReason) -> Self {
    Self::Skipped { reason }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Self::Success)
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, Self::Failure { .. })
  }
}

impl fmt::Display for NodeOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeOutcome::Success => f.write_str("success"),
      NodeOutcome::Failure { reason } => write!(f, "failure({})", reason),
      NodeOutcome::Skipped { reason } => write!(f, "skipped({})", reason),
    }
  }
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
  /// At least one trigger fired and no action failed.
  Completed,
  /// At least one trigger fired and some action failed.
  CompletedWithFailures,
  /// No trigger condition held.
  NoTriggerFired,
  /// The run was cancelled before traversal finished.
  Aborted,
}

impl fmt::Display for RunStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      RunStatus::Completed => "completed",
      RunStatus::CompletedWithFailures => "completed-with-failures",
      RunStatus::NoTriggerFired => "no-trigger-fired",
      RunStatus::Aborted => "aborted",
    })
  }
}

/// Result of a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
  /// Unique run ID.
  pub run_id: String,
  pub status: RunStatus,
  /// `(node_id, outcome)` in the order outcomes were first recorded.
  pub outcomes: Vec<(String, NodeOutcome)>,
}

impl RunResult {
  /// Outcome recorded for a node, if any.
  pub fn outcome(&self, node_id: &str) -> Option<&NodeOutcome> {
    self
      .outcomes
      .iter()
      .find(|(id, _)| id == node_id)
      .map(|(_, outcome)| outcome)
  }

  /// Node ids in outcome order.
  pub fn node_ids(&self) -> Vec<&str> {
    self.outcomes.iter().map(|(id, _)| id.as_str()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_outcome_display() {
    assert_eq!(NodeOutcome::Success.to_string(), "success");
    assert_eq!(NodeOutcome::failure("boom").to_string(), "failure(boom)");
    assert_eq!(
      NodeOutcome::skipped(SkipReason::DanglingReference).to_string(),
      "skipped(dangling-reference)"
    );
  }

  #[test]
  fn test_result_serialization() {
    let result = RunResult {
      run_id: "r1".to_string(),
      status: RunStatus::CompletedWithFailures,
      outcomes: vec![
        ("a1".to_string(), NodeOutcome::failure("boom")),
        ("a2".to_string(), NodeOutcome::skipped(SkipReason::Halted)),
      ],
    };

    assert_eq!(
      serde_json::to_value(&result).unwrap(),
      json!({
        "run_id": "r1",
        "status": "completed-with-failures",
        "outcomes": [
          ["a1", { "outcome": "failure", "reason": "boom" }],
          ["a2", { "outcome": "skipped", "reason": { "kind": "halted" } }]
        ]
      })
    );
  }
}
