use async_trait::async_trait;

use crate::element::Element;
use crate::error::CanvasError;
use crate::snapshot::Snapshot;

/// Host-provided canvas mutators.
///
/// Actions call these to apply their effects. Implementations own the live
/// canvas state; the engine only ever sees [`Snapshot`]s of it.
#[async_trait]
pub trait Canvas: Send + Sync {
  /// Current state of an element.
  async fn get(&self, element_id: &str) -> Result<Element, CanvasError>;

  /// Set a single property on an element.
  async fn set_property(
    &self,
    element_id: &str,
    key: &str,
    value: serde_json::Value,
  ) -> Result<(), CanvasError>;

  /// Move an element by `(dx, dy)`.
  async fn translate(&self, element_id: &str, dx: f64, dy: f64) -> Result<(), CanvasError>;

  /// Remove an element (and drop it from the selection).
  async fn remove(&self, element_id: &str) -> Result<(), CanvasError>;

  /// Capture the current selection.
  async fn snapshot(&self) -> Snapshot;
}
