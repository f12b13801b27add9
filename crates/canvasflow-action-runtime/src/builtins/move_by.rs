use std::collections::HashMap;

use async_trait::async_trait;

use super::required_f64;
use crate::action::{Action, ActionContext};
use crate::error::ActionError;
use crate::input::InputType;

/// Translates every activated element by `(dx, dy)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveBy;

#[async_trait]
impl Action for MoveBy {
  fn input_types(&self) -> HashMap<String, InputType> {
    HashMap::from([
      ("dx".to_string(), InputType::Number),
      ("dy".to_string(), InputType::Number),
    ])
  }

  async fn execute(
    &self,
    ctx: &ActionContext,
    inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    let dx = required_f64(inputs, "dx")?;
    let dy = required_f64(inputs, "dy")?;

    for element in &ctx.activation {
      ctx.canvas.translate(&element.id, dx, dy).await?;
    }
    Ok(())
  }
}
