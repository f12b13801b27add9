use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Read-only capture of the canvas selection at the moment a run begins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  selection: Vec<Element>,
}

impl Snapshot {
  pub fn new(selection: Vec<Element>) -> Self {
    Self { selection }
  }

  /// Currently selected elements, in selection order.
  pub fn selection(&self) -> &[Element] {
    &self.selection
  }

  pub fn is_empty(&self) -> bool {
    self.selection.is_empty()
  }

  pub fn len(&self) -> usize {
    self.selection.len()
  }
}
