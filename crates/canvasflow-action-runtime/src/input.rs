//! Input resolution using minijinja templates.
//!
//! Resolves action inputs by rendering minijinja templates against the run's
//! state, then coerces the resolved strings to the types the action declares.
//!
//! # Flow
//! 1. Template resolution: `HashMap<String, String>` → render templates to strings
//! 2. Type coercion: `HashMap<String, String>` → `serde_json::Value` object
//!
//! # Template context
//! ```json
//! {
//!   "run_id": "…",
//!   "node_id": "a1",
//!   "trigger_id": "t1",
//!   "selection": [{ "id": "img-1", "kind": "image", "properties": {…} }],
//!   "activation": [{ "id": "img-1", "kind": "image", "properties": {…} }],
//!   "count": 1
//! }
//! ```
//!
//! so that e.g. `"{{ activation | length }} image(s)"` or
//! `"{{ activation[0].properties.left + 10 }}"` work as input values.

use std::collections::HashMap;

use canvasflow_config::InputValue;
use minijinja::{Environment, Value};
use serde_json::json;

use crate::action::ActionContext;
use crate::error::ActionError;

/// Types an action can declare for its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
  String,
  Number,
  Integer,
  Boolean,
  Array,
  Object,
  /// Parsed as JSON when possible, otherwise kept as a string.
  Json,
}

/// Build the template context for an action invocation.
pub fn template_context(ctx: &ActionContext) -> serde_json::Value {
  json!({
    "run_id": ctx.run_id,
    "node_id": ctx.node_id,
    "trigger_id": ctx.trigger_id,
    "selection": ctx.snapshot.selection(),
    "activation": ctx.activation,
    "count": ctx.activation.len(),
  })
}

/// Render each input template against `context`.
pub fn resolve_inputs(
  inputs: &HashMap<String, InputValue>,
  context: &serde_json::Value,
) -> Result<HashMap<String, String>, ActionError> {
  let env = Environment::new();
  let ctx_value = Value::from_serialize(context);

  let mut resolved = HashMap::with_capacity(inputs.len());
  for (key, template) in inputs {
    let value = env
      .render_str(template, ctx_value.clone())
      .map_err(|e| ActionError::InputResolution {
        input: key.clone(),
        message: e.to_string(),
      })?;
    resolved.insert(key.clone(), value);
  }

  Ok(resolved)
}

/// Coerce resolved string inputs to typed JSON values.
///
/// Inputs without a declared type stay strings.
pub fn coerce_inputs(
  resolved: &HashMap<String, String>,
  types: &HashMap<String, InputType>,
) -> Result<serde_json::Value, ActionError> {
  let mut result = serde_json::Map::new();

  for (key, value) in resolved {
    let input_type = types.get(key).copied().unwrap_or(InputType::String);
    result.insert(key.clone(), coerce_value(key, value, input_type)?);
  }

  Ok(serde_json::Value::Object(result))
}

/// Coerce a single string value to a typed JSON value.
fn coerce_value(
  key: &str,
  value: &str,
  input_type: InputType,
) -> Result<serde_json::Value, ActionError> {
  let trimmed = value.trim();

  match input_type {
    InputType::String => Ok(serde_json::Value::String(value.to_string())),

    InputType::Number => trimmed
      .parse::<f64>()
      .ok()
      .and_then(serde_json::Number::from_f64)
      .map(serde_json::Value::Number)
      .ok_or_else(|| ActionError::invalid_input(key, format!("expected number, got '{}'", value))),

    InputType::Integer => trimmed
      .parse::<i64>()
      .map(|n| serde_json::Value::Number(n.into()))
      .map_err(|_| ActionError::invalid_input(key, format!("expected integer, got '{}'", value))),

    InputType::Boolean => match trimmed.to_lowercase().as_str() {
      "true" => Ok(serde_json::Value::Bool(true)),
      "false" => Ok(serde_json::Value::Bool(false)),
      _ => Err(ActionError::invalid_input(
        key,
        format!("expected boolean, got '{}'", value),
      )),
    },

    InputType::Array => match serde_json::from_str(trimmed) {
      Ok(v @ serde_json::Value::Array(_)) => Ok(v),
      _ => Err(ActionError::invalid_input(
        key,
        format!("expected array, got '{}'", value),
      )),
    },

    InputType::Object => match serde_json::from_str(trimmed) {
      Ok(v @ serde_json::Value::Object(_)) => Ok(v),
      _ => Err(ActionError::invalid_input(
        key,
        format!("expected object, got '{}'", value),
      )),
    },

    InputType::Json => Ok(
      serde_json::from_str(trimmed).unwrap_or_else(|_| serde_json::Value::String(value.to_string())),
    ),
  }
}
