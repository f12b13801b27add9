use std::collections::HashMap;
use std::sync::Arc;

use crate::action::Action;
use crate::builtins::{Delay, Log, MoveBy, Remove, SetProperty};

/// Maps action names to implementations.
#[derive(Clone, Default)]
pub struct ActionRegistry {
  actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a registry with the built-in actions installed.
  pub fn with_builtins() -> Self {
    let mut registry = Self::new();
    registry.register("log", Log);
    registry.register("set_property", SetProperty);
    registry.register("move_by", MoveBy);
    registry.register("remove", Remove);
    registry.register("delay", Delay);
    registry
  }

  /// Register an action, replacing any previous one with the same name.
  pub fn register(&mut self, name: impl Into<String>, action: impl Action + 'static) {
    self.actions.insert(name.into(), Arc::new(action));
  }

  /// Look up an action by name.
  pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
    self.actions.get(name).cloned()
  }

  /// Registered action names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}

impl std::fmt::Debug for ActionRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActionRegistry")
      .field("actions", &self.names())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtins_registered() {
    let registry = ActionRegistry::with_builtins();
    assert_eq!(
      registry.names(),
      vec!["delay", "log", "move_by", "remove", "set_property"]
    );
    assert!(registry.get("set_property").is_some());
    assert!(registry.get("explode").is_none());
  }
}
