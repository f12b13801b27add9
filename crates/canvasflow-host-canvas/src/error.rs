/// Errors returned by canvas mutators.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
  /// No element with this id exists on the canvas.
  #[error("element not found: {0}")]
  ElementNotFound(String),

  /// A property could not be applied to an element.
  #[error("invalid property '{key}' on element '{element_id}': {message}")]
  InvalidProperty {
    element_id: String,
    key: String,
    message: String,
  },
}
