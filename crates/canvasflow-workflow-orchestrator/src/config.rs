use serde::{Deserialize, Serialize};

/// Configuration for the workflow engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Stop traversal at the first failed action. Every action the walk reaches
  /// afterwards is recorded as `skipped(halted)`.
  #[serde(default)]
  pub halt_on_failure: bool,
}
