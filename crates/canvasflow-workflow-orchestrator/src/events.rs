//! Execution events and notifiers for observability.
//!
//! Events are emitted during a run so that hosts can drive UI feedback,
//! persist progress, etc. without the engine knowing about any of it.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::result::{RunStatus, SkipReason};

/// Events emitted during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// A run has started.
  RunStarted { run_id: String },

  /// A trigger condition has been evaluated.
  TriggerEvaluated {
    run_id: String,
    trigger_id: String,
    fired: bool,
  },

  /// An action has started executing.
  NodeStarted { run_id: String, node_id: String },

  /// An action has completed successfully.
  NodeCompleted { run_id: String, node_id: String },

  /// A node has failed.
  NodeFailed {
    run_id: String,
    node_id: String,
    error: String,
  },

  /// A node was skipped.
  NodeSkipped {
    run_id: String,
    node_id: String,
    reason: SkipReason,
  },

  /// The run has reached a terminal status.
  RunCompleted { run_id: String, status: RunStatus },

  /// The run was aborted by a fatal error.
  RunAborted { run_id: String, error: String },
}

/// Trait for receiving execution events.
///
/// The engine calls `notify` for each event. Implementations decide what to do
/// with them (persist, broadcast, ignore, ...).
pub trait ExecutionNotifier: Send + Sync {
  /// Called when an execution event occurs.
  fn notify(&self, event: ExecutionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded so a slow consumer never blocks a run. Volume is a handful of
  // events per node.
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  /// Create a new channel notifier.
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
