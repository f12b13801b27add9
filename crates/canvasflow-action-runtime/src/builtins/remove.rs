use async_trait::async_trait;

use crate::action::{Action, ActionContext};
use crate::error::ActionError;

/// Removes every activated element from the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Remove;

#[async_trait]
impl Action for Remove {
  async fn execute(
    &self,
    ctx: &ActionContext,
    _inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    for element in &ctx.activation {
      ctx.canvas.remove(&element.id).await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builtins::test_support::context;
  use canvasflow_host_canvas::Element;
  use serde_json::json;

  #[tokio::test]
  async fn test_second_removal_fails() {
    let (ctx, canvas) = context(
      vec![Element::new("img-1", "image"), Element::new("txt-1", "text")],
      "image",
    );

    Remove.execute(&ctx, &json!({})).await.unwrap();
    assert_eq!(canvas.document().await.elements.len(), 1);

    let err = Remove.execute(&ctx, &json!({})).await.unwrap_err();
    assert!(matches!(err, ActionError::Canvas(_)));
  }
}
