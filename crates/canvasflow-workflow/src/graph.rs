use std::collections::HashMap;

use crate::error::WorkflowError;
use crate::node::Node;

/// Node graph for traversal and analysis.
///
/// Nodes keep their authored order. Edges are the `next` lists of the nodes
/// themselves, so the graph never disagrees with its nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
  nodes: Vec<Node>,
  /// node_id -> position in `nodes`.
  index: HashMap<String, usize>,
}

impl Graph {
  /// Build a graph from nodes in authored order.
  ///
  /// Only id uniqueness is checked. `next` ids that do not resolve are kept
  /// and surface as dangling references at traversal time.
  pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self, WorkflowError> {
    let mut graph = Self::default();
    for node in nodes {
      graph.insert(node)?;
    }
    Ok(graph)
  }

  /// Append a node.
  pub fn insert(&mut self, node: Node) -> Result<(), WorkflowError> {
    if self.index.contains_key(&node.id) {
      return Err(WorkflowError::DuplicateNode(node.id));
    }
    self.index.insert(node.id.clone(), self.nodes.len());
    self.nodes.push(node);
    Ok(())
  }

  /// Get a node by id.
  pub fn get(&self, node_id: &str) -> Option<&Node> {
    self.index.get(node_id).map(|&i| &self.nodes[i])
  }

  /// Get a node by id, failing if it does not exist.
  pub fn resolve(&self, node_id: &str) -> Result<&Node, WorkflowError> {
    self
      .get(node_id)
      .ok_or_else(|| WorkflowError::NodeNotFound(node_id.to_string()))
  }

  /// All nodes in authored order.
  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  /// Trigger nodes in authored order.
  pub fn triggers(&self) -> impl Iterator<Item = &Node> {
    self.nodes.iter().filter(|node| node.is_trigger())
  }

  /// Get downstream node ids for a given node, in authored order.
  pub fn next(&self, node_id: &str) -> &[String] {
    self
      .get(node_id)
      .map(|node| node.next.as_slice())
      .unwrap_or(&[])
  }

  /// Every `(from, to)` edge whose target does not exist.
  pub fn dangling_references(&self) -> Vec<(String, String)> {
    self
      .nodes
      .iter()
      .flat_map(|node| {
        node
          .next
          .iter()
          .filter(|id| !self.index.contains_key(*id))
          .map(|id| (node.id.clone(), id.clone()))
      })
      .collect()
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use canvasflow_config::Condition;

  fn image_trigger(id: &str) -> Node {
    Node::trigger(id, Condition::new("selected_element", "contains", "image"))
  }

  #[test]
  fn test_preserves_authored_order() {
    let graph = Graph::new(vec![
      Node::action("a2", "log"),
      image_trigger("t1").with_next(["a1"]),
      Node::action("a1", "log").with_next(["a2"]),
    ])
    .unwrap();

    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a2", "t1", "a1"]);
    assert_eq!(graph.get("a1").unwrap().next, vec!["a2".to_string()]);
  }

  #[test]
  fn test_duplicate_id_rejected() {
    let result = Graph::new(vec![Node::action("a1", "log"), Node::action("a1", "log")]);
    assert!(matches!(result, Err(WorkflowError::DuplicateNode(id)) if id == "a1"));
  }

  #[test]
  fn test_dangling_reference_is_legal() {
    let graph = Graph::new(vec![image_trigger("t1").with_next(["a1", "missing"])]).unwrap();

    assert_eq!(
      graph.dangling_references(),
      vec![
        ("t1".to_string(), "a1".to_string()),
        ("t1".to_string(), "missing".to_string())
      ]
    );
    assert!(matches!(
      graph.resolve("missing"),
      Err(WorkflowError::NodeNotFound(id)) if id == "missing"
    ));
  }

  #[test]
  fn test_triggers_in_authored_order() {
    let graph = Graph::new(vec![
      image_trigger("t2"),
      Node::action("a1", "log"),
      image_trigger("t1"),
    ])
    .unwrap();

    let ids: Vec<&str> = graph.triggers().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["t2", "t1"]);
  }

  #[test]
  fn test_next_for_unknown_node_is_empty() {
    let graph = Graph::default();
    assert!(graph.next("nope").is_empty());
    assert!(graph.is_empty());
  }
}
