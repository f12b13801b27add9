use serde::{Deserialize, Serialize};

/// Well-known element kinds.
pub mod kinds {
  pub const IMAGE: &str = "image";
  pub const TEXT: &str = "text";
  pub const RECT: &str = "rect";
  pub const CIRCLE: &str = "circle";
  pub const GROUP: &str = "group";
}

/// An element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
  pub id: String,
  /// Element kind, e.g. "image" or "text".
  pub kind: String,
  /// Free-form element properties (position, opacity, fill, ...).
  #[serde(default)]
  pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Element {
  pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      kind: kind.into(),
      properties: serde_json::Map::new(),
    }
  }

  pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
    self.properties.insert(key.into(), value);
    self
  }

  pub fn is_kind(&self, kind: &str) -> bool {
    self.kind == kind
  }

  /// Numeric property, if present.
  pub fn number(&self, key: &str) -> Option<f64> {
    self.properties.get(key).and_then(|v| v.as_f64())
  }
}
