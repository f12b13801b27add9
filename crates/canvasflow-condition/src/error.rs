use canvasflow_config::Condition;

/// Errors produced while evaluating a trigger condition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
  /// The evaluator does not recognise this condition.
  #[error("unsupported condition: {when} {conditional} {target}")]
  Unsupported {
    when: String,
    conditional: String,
    target: String,
  },

  /// The evaluator failed on well-formed input. Aborts the run.
  #[error("condition evaluation failed: {message}")]
  Fatal { message: String },
}

impl ConditionError {
  pub fn unsupported(condition: &Condition) -> Self {
    Self::Unsupported {
      when: condition.when.clone(),
      conditional: condition.conditional.clone(),
      target: condition.target.clone(),
    }
  }

  pub fn fatal(message: impl Into<String>) -> Self {
    Self::Fatal {
      message: message.into(),
    }
  }
}
