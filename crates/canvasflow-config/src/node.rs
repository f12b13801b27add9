use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::input::InputValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  pub id: String,
  #[serde(default)]
  pub label: String,
  #[serde(flatten)]
  pub node_type: NodeType,
  /// Successor node ids, in authored order.
  #[serde(default)]
  pub next: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeType {
  /// A trigger node whose condition gates the downstream actions.
  Trigger { condition: Condition },
  /// An action node performing an effect against the canvas.
  Action {
    /// Name of the action in the host's action registry (e.g. "set_property").
    action: String,
    #[serde(default)]
    inputs: HashMap<String, InputValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
  },
  /// Any node kind this version does not know about.
  #[serde(other)]
  Unknown,
}
