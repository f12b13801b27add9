//! Action node execution.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use canvasflow_config::InputValue;
use futures::FutureExt;
use tracing::{error, info, instrument};

use crate::action::ActionContext;
use crate::error::ActionError;
use crate::input::{coerce_inputs, resolve_inputs, template_context};
use crate::registry::ActionRegistry;

/// One action node invocation.
pub struct ActionInvocation<'a> {
  /// Registry name of the action.
  pub action: &'a str,
  /// Input templates from the node definition.
  pub inputs: &'a HashMap<String, InputValue>,
  /// Optional deadline for the effect.
  pub timeout_ms: Option<u64>,
}

/// Executes action nodes against an [`ActionRegistry`].
#[derive(Debug, Clone)]
pub struct ActionExecutor {
  registry: ActionRegistry,
}

impl ActionExecutor {
  pub fn new(registry: ActionRegistry) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &ActionRegistry {
    &self.registry
  }

  /// Resolve inputs and run the action's effect.
  ///
  /// Panics inside the effect are caught and returned as
  /// [`ActionError::Panicked`]; an elapsed `timeout_ms` becomes
  /// [`ActionError::Timeout`].
  #[instrument(
    name = "action_execute",
    skip(self, invocation, ctx),
    fields(
      run_id = %ctx.run_id,
      node_id = %ctx.node_id,
      action = %invocation.action,
    )
  )]
  pub async fn execute(
    &self,
    invocation: ActionInvocation<'_>,
    ctx: &ActionContext,
  ) -> Result<(), ActionError> {
    info!(activation = ctx.activation.len(), "action started");

    let result = self.execute_inner(invocation, ctx).await;

    match &result {
      Ok(()) => info!("action completed"),
      Err(e) => error!(error = %e, "action failed"),
    }

    result
  }

  async fn execute_inner(
    &self,
    invocation: ActionInvocation<'_>,
    ctx: &ActionContext,
  ) -> Result<(), ActionError> {
    let action = self
      .registry
      .get(invocation.action)
      .ok_or_else(|| ActionError::UnknownAction {
        action: invocation.action.to_string(),
      })?;

    let resolved = resolve_inputs(invocation.inputs, &template_context(ctx))?;
    let inputs = coerce_inputs(&resolved, &action.input_types())?;

    let effect = AssertUnwindSafe(action.execute(ctx, &inputs)).catch_unwind();

    let outcome = match invocation.timeout_ms {
      Some(timeout_ms) => tokio::time::timeout(Duration::from_millis(timeout_ms), effect)
        .await
        .map_err(|_| ActionError::Timeout { timeout_ms })?,
      None => effect.await,
    };

    outcome.map_err(|payload| ActionError::Panicked {
      message: panic_message(payload.as_ref()),
    })?
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    s.to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "unknown panic".to_string()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::action::action_fn;
  use canvasflow_host_canvas::{CanvasDocument, Element, InMemoryCanvas, Snapshot};
  use serde_json::json;
  use tokio_util::sync::CancellationToken;

  fn context() -> ActionContext {
    let element = Element::new("img-1", "image");
    ActionContext {
      run_id: "run".to_string(),
      node_id: "a1".to_string(),
      trigger_id: Some("t1".to_string()),
      snapshot: Arc::new(Snapshot::new(vec![element.clone()])),
      activation: vec![element.clone()],
      canvas: Arc::new(InMemoryCanvas::new(CanvasDocument {
        elements: vec![element],
        selection: vec!["img-1".to_string()],
      })),
      cancel: CancellationToken::new(),
    }
  }

  fn explode() -> Result<(), ActionError> {
    panic!("kaboom")
  }

  fn invocation<'a>(
    action: &'a str,
    inputs: &'a HashMap<String, InputValue>,
    timeout_ms: Option<u64>,
  ) -> ActionInvocation<'a> {
    ActionInvocation {
      action,
      inputs,
      timeout_ms,
    }
  }

  #[tokio::test]
  async fn test_unknown_action() {
    let executor = ActionExecutor::new(ActionRegistry::new());
    let inputs = HashMap::new();

    let err = executor
      .execute(invocation("missing", &inputs, None), &context())
      .await
      .unwrap_err();
    assert!(matches!(err, ActionError::UnknownAction { action } if action == "missing"));
  }

  #[tokio::test]
  async fn test_inputs_resolved_before_execute() {
    let mut registry = ActionRegistry::new();
    registry.register(
      "check",
      action_fn(|_ctx, inputs| async move {
        if inputs["target"] == json!("img-1") {
          Ok(())
        } else {
          Err(ActionError::failed(format!("unexpected input {}", inputs)))
        }
      }),
    );
    let executor = ActionExecutor::new(registry);
    let inputs = HashMap::from([(
      "target".to_string(),
      "{{ activation[0].id }}".to_string(),
    )]);

    executor
      .execute(invocation("check", &inputs, None), &context())
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_timeout() {
    let mut registry = ActionRegistry::new();
    registry.register(
      "slow",
      action_fn(|_ctx, _inputs| async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
      }),
    );
    let executor = ActionExecutor::new(registry);
    let inputs = HashMap::new();

    let err = executor
      .execute(invocation("slow", &inputs, Some(10)), &context())
      .await
      .unwrap_err();
    assert!(matches!(err, ActionError::Timeout { timeout_ms: 10 }));
  }

  #[tokio::test]
  async fn test_panic_is_captured() {
    let mut registry = ActionRegistry::new();
    registry.register(
      "boom",
      action_fn(|_ctx, _inputs| async move { explode() }),
    );
    let executor = ActionExecutor::new(registry);
    let inputs = HashMap::new();

    let err = executor
      .execute(invocation("boom", &inputs, None), &context())
      .await
      .unwrap_err();
    assert!(matches!(err, ActionError::Panicked { message } if message == "kaboom"));
  }
}
