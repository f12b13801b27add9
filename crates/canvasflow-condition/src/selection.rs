//! Conditions over the current canvas selection.
//!
//! | conditional | fires when                                          | activation        |
//! |-------------|-----------------------------------------------------|-------------------|
//! | `is`        | selection non-empty, every element is `target`      | whole selection   |
//! | `is_not`    | selection non-empty, no element is `target`         | whole selection   |
//! | `contains`  | at least one selected element is `target`           | matching elements |
//!
//! `target` is an element kind, or `any` to match every kind.

use canvasflow_config::Condition;
use canvasflow_host_canvas::{Element, Snapshot, kinds};
use tracing::trace;

use crate::error::ConditionError;
use crate::evaluator::{ConditionEvaluator, ConditionMatch};

pub mod when {
  pub const SELECTED_ELEMENT: &str = "selected_element";
}

pub mod conditionals {
  pub const IS: &str = "is";
  pub const IS_NOT: &str = "is_not";
  pub const CONTAINS: &str = "contains";
}

pub mod targets {
  pub use canvasflow_host_canvas::kinds::{CIRCLE, GROUP, IMAGE, RECT, TEXT};

  pub const ANY: &str = "any";
}

#[derive(Debug, Clone, Copy)]
enum Conditional {
  Is,
  IsNot,
  Contains,
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
  Any,
  Kind(&'a str),
}

impl Target<'_> {
  fn accepts(&self, element: &Element) -> bool {
    match self {
      Target::Any => true,
      Target::Kind(kind) => element.is_kind(kind),
    }
  }
}

/// Evaluator for `selected_element` conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionEvaluator;

impl SelectionEvaluator {
  fn parse(condition: &Condition) -> Result<(Conditional, Target<'_>), ConditionError> {
    if condition.when != when::SELECTED_ELEMENT {
      return Err(ConditionError::unsupported(condition));
    }

    let conditional = match condition.conditional.as_str() {
      conditionals::IS => Conditional::Is,
      conditionals::IS_NOT => Conditional::IsNot,
      conditionals::CONTAINS => Conditional::Contains,
      _ => return Err(ConditionError::unsupported(condition)),
    };

    let target = match condition.target.as_str() {
      targets::ANY => Target::Any,
      kind @ (kinds::IMAGE | kinds::TEXT | kinds::RECT | kinds::CIRCLE | kinds::GROUP) => {
        Target::Kind(kind)
      }
      _ => return Err(ConditionError::unsupported(condition)),
    };

    Ok((conditional, target))
  }
}

impl ConditionEvaluator for SelectionEvaluator {
  fn evaluate(
    &self,
    condition: &Condition,
    snapshot: &Snapshot,
  ) -> Result<ConditionMatch, ConditionError> {
    let (conditional, target) = Self::parse(condition)?;
    let selection = snapshot.selection();

    let result = match conditional {
      Conditional::Is if !selection.is_empty() && selection.iter().all(|e| target.accepts(e)) => {
        ConditionMatch::fired(selection.to_vec())
      }
      Conditional::IsNot
        if !selection.is_empty() && !selection.iter().any(|e| target.accepts(e)) =>
      {
        ConditionMatch::fired(selection.to_vec())
      }
      Conditional::Contains => {
        let matching: Vec<Element> = selection
          .iter()
          .filter(|e| target.accepts(e))
          .cloned()
          .collect();
        if matching.is_empty() {
          ConditionMatch::not_fired()
        } else {
          ConditionMatch::fired(matching)
        }
      }
      _ => ConditionMatch::not_fired(),
    };

    trace!(condition = %condition, fired = result.fired, "selection condition evaluated");
    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn snapshot(kinds: &[&str]) -> Snapshot {
    Snapshot::new(
      kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| Element::new(format!("e{}", i), *kind))
        .collect(),
    )
  }

  fn condition(conditional: &str, target: &str) -> Condition {
    Condition::new(when::SELECTED_ELEMENT, conditional, target)
  }

  fn ids(m: &ConditionMatch) -> Vec<&str> {
    m.activation.iter().map(|e| e.id.as_str()).collect()
  }

  #[test]
  fn test_contains_activates_matching_subset() {
    let result = SelectionEvaluator
      .evaluate(&condition("contains", "image"), &snapshot(&["text", "image", "rect"]))
      .unwrap();

    assert!(result.fired);
    assert_eq!(ids(&result), vec!["e1"]);
  }

  #[test]
  fn test_contains_without_match() {
    let result = SelectionEvaluator
      .evaluate(&condition("contains", "image"), &snapshot(&["text", "rect"]))
      .unwrap();

    assert_eq!(result, ConditionMatch::not_fired());
  }

  #[test]
  fn test_is_requires_every_element() {
    let evaluator = SelectionEvaluator;
    let cond = condition("is", "image");

    assert!(evaluator.matches(&cond, &snapshot(&["image", "image"])).unwrap());
    assert!(!evaluator.matches(&cond, &snapshot(&["image", "text"])).unwrap());
    assert!(!evaluator.matches(&cond, &snapshot(&[])).unwrap());
  }

  #[test]
  fn test_is_not() {
    let evaluator = SelectionEvaluator;
    let cond = condition("is_not", "image");

    let result = evaluator.evaluate(&cond, &snapshot(&["text", "rect"])).unwrap();
    assert!(result.fired);
    assert_eq!(ids(&result), vec!["e0", "e1"]);

    assert!(!evaluator.matches(&cond, &snapshot(&["text", "image"])).unwrap());
    assert!(!evaluator.matches(&cond, &snapshot(&[])).unwrap());
  }

  #[test]
  fn test_any_target() {
    let evaluator = SelectionEvaluator;
    assert!(evaluator.matches(&condition("contains", "any"), &snapshot(&["group"])).unwrap());
    assert!(!evaluator.matches(&condition("contains", "any"), &snapshot(&[])).unwrap());
  }

  #[test]
  fn test_unsupported_parts() {
    let evaluator = SelectionEvaluator;
    let snap = snapshot(&["image"]);

    for cond in [
      Condition::new("canvas_resized", "is", "image"),
      condition("starts_with", "image"),
      condition("is", "video"),
    ] {
      assert_eq!(
        evaluator.evaluate(&cond, &snap),
        Err(ConditionError::unsupported(&cond))
      );
    }
  }

  #[test]
  fn test_idempotent() {
    let evaluator = SelectionEvaluator;
    let cond = condition("contains", "text");
    let snap = snapshot(&["text", "image", "text"]);

    let first = evaluator.evaluate(&cond, &snap).unwrap();
    let second = evaluator.evaluate(&cond, &snap).unwrap();
    assert_eq!(first, second);
    assert_eq!(ids(&first), vec!["e0", "e2"]);
  }
}
