use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use canvasflow_host_canvas::{Canvas, Element, Snapshot};
use tokio_util::sync::CancellationToken;

use crate::error::ActionError;
use crate::input::InputType;

/// Everything an action can see while it runs.
#[derive(Clone)]
pub struct ActionContext {
  /// Run this invocation belongs to.
  pub run_id: String,
  /// Action node being executed.
  pub node_id: String,
  /// Trigger whose walk reached this node, if any.
  pub trigger_id: Option<String>,
  /// Selection captured when the run started.
  pub snapshot: Arc<Snapshot>,
  /// Elements that satisfied the trigger condition.
  pub activation: Vec<Element>,
  /// Host mutators.
  pub canvas: Arc<dyn Canvas>,
  /// Run cancellation signal. Long-running actions may observe it.
  pub cancel: CancellationToken,
}

impl std::fmt::Debug for ActionContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActionContext")
      .field("run_id", &self.run_id)
      .field("node_id", &self.node_id)
      .field("trigger_id", &self.trigger_id)
      .field("activation", &self.activation.len())
      .finish_non_exhaustive()
  }
}

/// A side-effecting action that a workflow node can invoke.
#[async_trait]
pub trait Action: Send + Sync {
  /// Declared input types, used to coerce rendered templates.
  /// Inputs not listed here stay strings.
  fn input_types(&self) -> HashMap<String, InputType> {
    HashMap::new()
  }

  /// Perform the effect.
  async fn execute(&self, ctx: &ActionContext, inputs: &serde_json::Value)
  -> Result<(), ActionError>;
}

/// An [`Action`] backed by an async closure.
pub struct FnAction<F> {
  f: F,
}

/// Wrap an async closure as an [`Action`].
///
/// ```ignore
/// registry.register("notify", action_fn(|ctx, _inputs| async move {
///   println!("{} elements", ctx.activation.len());
///   Ok(())
/// }));
/// ```
pub fn action_fn<F, Fut>(f: F) -> FnAction<F>
where
  F: Fn(ActionContext, serde_json::Value) -> Fut + Send + Sync,
  Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
  FnAction { f }
}

#[async_trait]
impl<F, Fut> Action for FnAction<F>
where
  F: Fn(ActionContext, serde_json::Value) -> Fut + Send + Sync,
  Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
  async fn execute(
    &self,
    ctx: &ActionContext,
    inputs: &serde_json::Value,
  ) -> Result<(), ActionError> {
    (self.f)(ctx.clone(), inputs.clone()).await
  }
}
