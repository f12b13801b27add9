use std::collections::HashMap;

use canvasflow_config::{Condition, InputValue, NodeDef, NodeType};
use serde::{Deserialize, Serialize};

/// A node in a locked workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub id: String,
  /// Human-readable label. Never used for lookups.
  pub label: String,
  pub kind: NodeKind,
  /// Successor ids in authored order. May reference missing nodes.
  pub next: Vec<String>,
}

/// The kind of a locked node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
  Trigger(TriggerSpec),
  Action(ActionSpec),
  /// A node whose kind was not recognised when the definition was loaded.
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
  pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
  /// Registry name of the action.
  pub action: String,
  pub inputs: HashMap<String, InputValue>,
  pub timeout_ms: Option<u64>,
}

impl Node {
  pub fn trigger(id: impl Into<String>, condition: Condition) -> Self {
    Self {
      id: id.into(),
      label: "Trigger".to_string(),
      kind: NodeKind::Trigger(TriggerSpec { condition }),
      next: Vec::new(),
    }
  }

  pub fn action(id: impl Into<String>, action: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      label: "Action".to_string(),
      kind: NodeKind::Action(ActionSpec {
        action: action.into(),
        inputs: HashMap::new(),
        timeout_ms: None,
      }),
      next: Vec::new(),
    }
  }

  /// Replace the successor list.
  pub fn with_next<I, S>(mut self, next: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.next = next.into_iter().map(Into::into).collect();
    self
  }

  /// Add a templated input. No-op for non-action nodes.
  pub fn with_input(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
    if let NodeKind::Action(spec) = &mut self.kind {
      spec.inputs.insert(key.into(), value.into());
    }
    self
  }

  /// Set a per-action timeout. No-op for non-action nodes.
  pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
    if let NodeKind::Action(spec) = &mut self.kind {
      spec.timeout_ms = Some(timeout_ms);
    }
    self
  }

  pub fn is_trigger(&self) -> bool {
    matches!(self.kind, NodeKind::Trigger(_))
  }
}

impl From<NodeDef> for Node {
  fn from(def: NodeDef) -> Self {
    let kind = match def.node_type {
      NodeType::Trigger { condition } => NodeKind::Trigger(TriggerSpec { condition }),
      NodeType::Action {
        action,
        inputs,
        timeout_ms,
      } => NodeKind::Action(ActionSpec {
        action,
        inputs,
        timeout_ms,
      }),
      NodeType::Unknown => NodeKind::Unknown,
    };

    Self {
      id: def.id,
      label: def.label,
      kind,
      next: def.next,
    }
  }
}
