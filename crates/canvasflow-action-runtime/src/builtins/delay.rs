use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::required;
use crate::action::{Action, ActionContext};
use crate::error::ActionError;
use crate::input::InputType;

/// Sleeps for `ms` milliseconds, or until the run is cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delay;

#[async_trait]
impl Action for Delay {
  fn input_types(&self) -> HashMap<String, InputType> {
    HashMap::from([("ms".to_string(), InputType::Integer)])
  }

  async fn execute(
    &self,
    ctx: &ActionContext,
    inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    let ms = required(inputs, "ms")?
      .as_u64()
      .ok_or_else(|| ActionError::invalid_input("ms", "expected non-negative integer"))?;

    tokio::select! {
      _ = ctx.cancel.cancelled() => Err(ActionError::failed("cancelled")),
      _ = tokio::time::sleep(Duration::from_millis(ms)) => Ok(()),
    }
  }
}
