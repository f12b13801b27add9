use serde::{Deserialize, Serialize};

/// A trigger condition: `(when, conditional, target)`.
///
/// The vocabulary is defined by whichever evaluator the host installs, so all
/// three parts are kept as plain strings here. For example
/// `("selected_element", "contains", "image")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
  /// Category of external state being examined.
  pub when: String,
  /// Comparison operator.
  pub conditional: String,
  /// Value or category compared against.
  pub target: String,
}

impl Condition {
  pub fn new(
    when: impl Into<String>,
    conditional: impl Into<String>,
    target: impl Into<String>,
  ) -> Self {
    Self {
      when: when.into(),
      conditional: conditional.into(),
      target: target.into(),
    }
  }
}

impl std::fmt::Display for Condition {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {} {}", self.when, self.conditional, self.target)
  }
}
