use serde::{Deserialize, Serialize};

use crate::node::NodeDef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  pub workflow_id: String,
  #[serde(default)]
  pub name: String,
  /// Nodes in authored order. This is display order, not execution order.
  pub nodes: Vec<NodeDef>,
}
