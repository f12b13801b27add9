//! Action error types.

use canvasflow_host_canvas::CanvasError;

/// Errors an action invocation can end with.
///
/// Every variant is recorded by the engine as a node failure; none of them
/// abort a run on their own.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
  /// No action is registered under this name.
  #[error("unknown action '{action}'")]
  UnknownAction { action: String },

  /// Failed to render an input template.
  #[error("failed to resolve input '{input}': {message}")]
  InputResolution { input: String, message: String },

  /// A resolved input is missing or has the wrong type.
  #[error("invalid input '{input}': {message}")]
  InvalidInput { input: String, message: String },

  /// A canvas mutator rejected the effect.
  #[error("canvas error: {0}")]
  Canvas(#[from] CanvasError),

  /// The action reported failure.
  #[error("{message}")]
  Failed { message: String },

  /// The action did not finish within its deadline.
  #[error("timeout after {timeout_ms}ms")]
  Timeout { timeout_ms: u64 },

  /// The action panicked.
  #[error("action panicked: {message}")]
  Panicked { message: String },
}

impl ActionError {
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed {
      message: message.into(),
    }
  }

  pub fn invalid_input(input: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InvalidInput {
      input: input.into(),
      message: message.into(),
    }
  }
}
