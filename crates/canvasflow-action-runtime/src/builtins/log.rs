use async_trait::async_trait;
use tracing::info;

use crate::action::{Action, ActionContext};
use crate::error::ActionError;

/// Logs the activation. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log;

#[async_trait]
impl Action for Log {
  async fn execute(
    &self,
    ctx: &ActionContext,
    inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    let message = inputs
      .get("message")
      .and_then(|v| v.as_str())
      .unwrap_or("workflow action");
    let elements: Vec<&str> = ctx.activation.iter().map(|e| e.id.as_str()).collect();

    info!(
      run_id = %ctx.run_id,
      node_id = %ctx.node_id,
      elements = ?elements,
      "{}",
      message
    );
    Ok(())
  }
}
