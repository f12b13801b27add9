use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::canvas::Canvas;
use crate::element::Element;
use crate::error::CanvasError;
use crate::snapshot::Snapshot;

/// Serializable canvas contents: every element plus the ids currently selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
  #[serde(default)]
  pub elements: Vec<Element>,
  #[serde(default)]
  pub selection: Vec<String>,
}

impl CanvasDocument {
  fn element_mut(&mut self, element_id: &str) -> Result<&mut Element, CanvasError> {
    self
      .elements
      .iter_mut()
      .find(|e| e.id == element_id)
      .ok_or_else(|| CanvasError::ElementNotFound(element_id.to_string()))
  }

  /// Selected elements in selection order. Unknown ids are ignored.
  pub fn selected(&self) -> Vec<Element> {
    self
      .selection
      .iter()
      .filter_map(|id| self.elements.iter().find(|e| &e.id == id))
      .cloned()
      .collect()
  }
}

/// Numeric position property. Missing counts as 0.
fn coordinate(element: &Element, key: &str) -> Result<f64, CanvasError> {
  match element.properties.get(key) {
    None => Ok(0.0),
    Some(value) => element.number(key).ok_or_else(|| CanvasError::InvalidProperty {
      element_id: element.id.clone(),
      key: key.to_string(),
      message: format!("expected number, got {}", value),
    }),
  }
}

/// In-memory [`Canvas`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryCanvas {
  document: RwLock<CanvasDocument>,
}

impl InMemoryCanvas {
  pub fn new(document: CanvasDocument) -> Self {
    Self {
      document: RwLock::new(document),
    }
  }

  /// Copy of the current document.
  pub async fn document(&self) -> CanvasDocument {
    self.document.read().await.clone()
  }
}

#[async_trait]
impl Canvas for InMemoryCanvas {
  async fn get(&self, element_id: &str) -> Result<Element, CanvasError> {
    self
      .document
      .read()
      .await
      .elements
      .iter()
      .find(|e| e.id == element_id)
      .cloned()
      .ok_or_else(|| CanvasError::ElementNotFound(element_id.to_string()))
  }

  async fn set_property(
    &self,
    element_id: &str,
    key: &str,
    value: serde_json::Value,
  ) -> Result<(), CanvasError> {
    let mut document = self.document.write().await;
    let element = document.element_mut(element_id)?;
    debug!(element_id, key, value = %value, "set_property");
    element.properties.insert(key.to_string(), value);
    Ok(())
  }

  async fn translate(&self, element_id: &str, dx: f64, dy: f64) -> Result<(), CanvasError> {
    let mut document = self.document.write().await;
    let element = document.element_mut(element_id)?;

    // Validate both coordinates before writing either.
    let left = coordinate(element, "left")?;
    let top = coordinate(element, "top")?;
    element
      .properties
      .insert("left".to_string(), serde_json::json!(left + dx));
    element
      .properties
      .insert("top".to_string(), serde_json::json!(top + dy));

    debug!(element_id, dx, dy, "translate");
    Ok(())
  }

  async fn remove(&self, element_id: &str) -> Result<(), CanvasError> {
    let mut document = self.document.write().await;
    let before = document.elements.len();
    document.elements.retain(|e| e.id != element_id);
    if document.elements.len() == before {
      return Err(CanvasError::ElementNotFound(element_id.to_string()));
    }
    document.selection.retain(|id| id != element_id);
    debug!(element_id, "remove");
    Ok(())
  }

  async fn snapshot(&self) -> Snapshot {
    Snapshot::new(self.document.read().await.selected())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::element::kinds;
  use serde_json::json;

  fn document() -> CanvasDocument {
    CanvasDocument {
      elements: vec![
        Element::new("img-1", kinds::IMAGE).with_property("left", json!(10)),
        Element::new("txt-1", kinds::TEXT),
        Element::new("img-2", kinds::IMAGE),
      ],
      selection: vec!["img-2".to_string(), "img-1".to_string(), "ghost".to_string()],
    }
  }

  #[tokio::test]
  async fn test_snapshot_follows_selection_order() {
    let canvas = InMemoryCanvas::new(document());
    let snapshot = canvas.snapshot().await;

    let ids: Vec<&str> = snapshot.selection().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["img-2", "img-1"]);
  }

  #[tokio::test]
  async fn test_snapshot_is_detached_from_canvas() {
    let canvas = InMemoryCanvas::new(document());
    let snapshot = canvas.snapshot().await;

    canvas
      .set_property("img-1", "opacity", json!(0.5))
      .await
      .unwrap();

    assert!(snapshot.selection()[1].properties.get("opacity").is_none());
    assert_eq!(
      canvas.get("img-1").await.unwrap().properties["opacity"],
      json!(0.5)
    );
  }

  #[tokio::test]
  async fn test_translate() {
    let canvas = InMemoryCanvas::new(document());
    canvas.translate("img-1", 5.0, -2.0).await.unwrap();

    let element = canvas.get("img-1").await.unwrap();
    assert_eq!(element.number("left"), Some(15.0));
    assert_eq!(element.number("top"), Some(-2.0));
  }

  #[tokio::test]
  async fn test_translate_non_numeric() {
    let canvas = InMemoryCanvas::new(CanvasDocument {
      elements: vec![Element::new("a", kinds::RECT).with_property("left", json!("far"))],
      selection: vec![],
    });

    let result = canvas.translate("a", 1.0, 1.0).await;
    assert!(matches!(result, Err(CanvasError::InvalidProperty { key, .. }) if key == "left"));
  }

  #[tokio::test]
  async fn test_translate_failure_leaves_element_unchanged() {
    let canvas = InMemoryCanvas::new(CanvasDocument {
      elements: vec![
        Element::new("a", kinds::RECT)
          .with_property("left", json!(1))
          .with_property("top", json!("x")),
      ],
      selection: vec![],
    });

    let result = canvas.translate("a", 10.0, 1.0).await;
    assert!(matches!(result, Err(CanvasError::InvalidProperty { key, .. }) if key == "top"));

    let element = canvas.get("a").await.unwrap();
    assert_eq!(element.properties["left"], json!(1));
    assert_eq!(element.properties["top"], json!("x"));
  }

  #[tokio::test]
  async fn test_remove_drops_selection() {
    let canvas = InMemoryCanvas::new(document());
    canvas.remove("img-1").await.unwrap();

    let doc = canvas.document().await;
    assert_eq!(doc.elements.len(), 2);
    assert!(!doc.selection.contains(&"img-1".to_string()));
    assert!(matches!(
      canvas.remove("img-1").await,
      Err(CanvasError::ElementNotFound(_))
    ));
  }
}
