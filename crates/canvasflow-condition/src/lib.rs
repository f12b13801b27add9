//! Canvasflow Condition
//!
//! Decides whether a trigger's `(when, conditional, target)` condition holds
//! for a [`Snapshot`](canvasflow_host_canvas::Snapshot).
//!
//! Evaluators are pure: the same condition and snapshot always produce the same
//! answer and nothing is mutated, so triggers can be re-evaluated freely.
//! An evaluator that does not understand a condition returns
//! [`ConditionError::Unsupported`] instead of `false`, which keeps
//! "checked and false" distinct from "not understood".

mod error;
mod evaluator;
mod registry;
mod selection;

pub use error::ConditionError;
pub use evaluator::{ConditionEvaluator, ConditionMatch};
pub use registry::EvaluatorRegistry;
pub use selection::{SelectionEvaluator, conditionals, targets, when};
