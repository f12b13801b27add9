//! Error types for workflow execution.

use thiserror::Error;

/// Errors that escape a run.
///
/// Per-node problems (failed actions, dangling references, unsupported
/// conditions) are recorded in the [`RunResult`](crate::RunResult) instead.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// A condition evaluator failed on well-formed input. The run is aborted.
  #[error("condition evaluation failed for trigger '{trigger_id}': {message}")]
  EvaluatorFatal { trigger_id: String, message: String },

  /// Requested node does not exist.
  #[error("node '{node_id}' not found in workflow")]
  NodeNotFound { node_id: String },

  /// Requested node exists but is not an action.
  #[error("node '{node_id}' is not an action")]
  NotAnAction { node_id: String },

  /// The runner is no longer accepting runs.
  #[error("workflow runner channel closed")]
  RunnerClosed,
}
