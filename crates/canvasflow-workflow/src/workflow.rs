use canvasflow_config::WorkflowDef;

use crate::error::WorkflowError;
use crate::graph::Graph;
use crate::node::Node;

/// A locked workflow ready for execution.
#[derive(Debug, Clone)]
pub struct Workflow {
  pub workflow_id: String,
  pub name: String,
  pub graph: Graph,
}

impl Workflow {
  /// Lock a workflow definition into an executable graph.
  pub fn from_def(def: WorkflowDef) -> Result<Self, WorkflowError> {
    let graph = Graph::new(def.nodes.into_iter().map(Node::from))?;
    Ok(Self {
      workflow_id: def.workflow_id,
      name: def.name,
      graph,
    })
  }

  /// The graph structure for traversal.
  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&Node> {
    self.graph.get(node_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::NodeKind;
  use serde_json::json;

  #[test]
  fn test_from_def() {
    let def: WorkflowDef = serde_json::from_value(json!({
      "workflow_id": "wf",
      "name": "Dim images",
      "nodes": [
        {
          "id": "t1",
          "type": "trigger",
          "condition": { "when": "selected_element", "conditional": "contains", "target": "image" },
          "next": ["a1"]
        },
        {
          "id": "a1",
          "type": "action",
          "action": "set_property",
          "inputs": { "key": "opacity", "value": "0.5" },
          "timeout_ms": 250
        },
        { "id": "x1", "type": "webhook" }
      ]
    }))
    .unwrap();

    let workflow = Workflow::from_def(def).unwrap();
    assert_eq!(workflow.workflow_id, "wf");
    assert_eq!(workflow.graph().len(), 3);

    match &workflow.get_node("a1").unwrap().kind {
      NodeKind::Action(spec) => {
        assert_eq!(spec.action, "set_property");
        assert_eq!(spec.inputs["key"], "opacity");
        assert_eq!(spec.timeout_ms, Some(250));
      }
      other => panic!("expected action, got {:?}", other),
    }
    assert_eq!(workflow.get_node("x1").unwrap().kind, NodeKind::Unknown);
  }

  #[test]
  fn test_from_def_duplicate_ids() {
    let def: WorkflowDef = serde_json::from_value(json!({
      "workflow_id": "wf",
      "nodes": [
        { "id": "a1", "type": "action", "action": "log" },
        { "id": "a1", "type": "action", "action": "log" }
      ]
    }))
    .unwrap();

    assert!(matches!(
      Workflow::from_def(def),
      Err(WorkflowError::DuplicateNode(_))
    ));
  }
}
