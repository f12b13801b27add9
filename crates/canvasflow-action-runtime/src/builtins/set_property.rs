use std::collections::HashMap;

use async_trait::async_trait;

use super::{required, required_str};
use crate::action::{Action, ActionContext};
use crate::error::ActionError;
use crate::input::InputType;

/// Sets `key = value` on every activated element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetProperty;

#[async_trait]
impl Action for SetProperty {
  fn input_types(&self) -> HashMap<String, InputType> {
    HashMap::from([
      ("key".to_string(), InputType::String),
      ("value".to_string(), InputType::Json),
    ])
  }

  async fn execute(
    &self,
    ctx: &ActionContext,
    inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    let key = required_str(inputs, "key")?;
    if key.is_empty() {
      return Err(ActionError::invalid_input("key", "must not be empty"));
    }
    let value = required(inputs, "value")?;

    for element in &ctx.activation {
      ctx
        .canvas
        .set_property(&element.id, key, value.clone())
        .await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builtins::test_support::context;
  use canvasflow_host_canvas::{Canvas, Element};
  use serde_json::json;

  #[tokio::test]
  async fn test_sets_on_activation_only() {
    let (ctx, canvas) = context(
      vec![Element::new("img-1", "image"), Element::new("txt-1", "text")],
      "image",
    );

    SetProperty
      .execute(&ctx, &json!({ "key": "opacity", "value": 0.5 }))
      .await
      .unwrap();

    assert_eq!(
      canvas.get("img-1").await.unwrap().properties["opacity"],
      json!(0.5)
    );
    assert!(canvas.get("txt-1").await.unwrap().properties.get("opacity").is_none());
  }

  #[tokio::test]
  async fn test_missing_value() {
    let (ctx, _canvas) = context(vec![Element::new("img-1", "image")], "image");

    let err = SetProperty
      .execute(&ctx, &json!({ "key": "opacity" }))
      .await
      .unwrap_err();
    assert!(matches!(err, ActionError::InvalidInput { input, .. } if input == "value"));
  }
}
