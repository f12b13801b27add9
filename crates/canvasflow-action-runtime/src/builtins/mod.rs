//! Built-in actions.

mod delay;
mod log;
mod move_by;
mod remove;
mod set_property;

pub use delay::Delay;
pub use log::Log;
pub use move_by::MoveBy;
pub use remove::Remove;
pub use set_property::SetProperty;

use crate::error::ActionError;

fn required<'a>(inputs: &'a serde_json::Value, key: &str) -> Result<&'a serde_json::Value, ActionError> {
  inputs
    .get(key)
    .ok_or_else(|| ActionError::invalid_input(key, "missing"))
}

fn required_str<'a>(inputs: &'a serde_json::Value, key: &str) -> Result<&'a str, ActionError> {
  required(inputs, key)?
    .as_str()
    .ok_or_else(|| ActionError::invalid_input(key, "expected string"))
}

fn required_f64(inputs: &serde_json::Value, key: &str) -> Result<f64, ActionError> {
  required(inputs, key)?
    .as_f64()
    .ok_or_else(|| ActionError::invalid_input(key, "expected number"))
}
