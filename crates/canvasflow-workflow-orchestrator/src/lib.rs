//! Canvasflow Workflow Orchestrator
//!
//! This crate runs workflows: it evaluates trigger conditions against a
//! selection snapshot, walks the graph from every firing trigger, executes the
//! action nodes it reaches and reports a per-node outcome for the run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowRunner                         │
//! │  - owns mpsc channel of run requests                        │
//! │  - handle().submit(snapshot) queues a run                   │
//! │  - start(cancel) runs queued runs one at a time             │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     WorkflowEngine                          │
//! │  - execute(graph, snapshot, cancel) → RunResult             │
//! │  - trigger evaluation via ConditionEvaluator                │
//! │  - depth-first traversal, halt / cancel handling            │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ActionExecutor                          │
//! │  - templated inputs, timeout, panic capture                 │
//! │  - effects go through the host Canvas                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use canvasflow_workflow_orchestrator::{EngineConfig, WorkflowEngine, WorkflowRunner};
//! use tokio_util::sync::CancellationToken;
//!
//! let engine = WorkflowEngine::new(canvas, EngineConfig { halt_on_failure: true });
//! let result = engine
//!   .execute(workflow.graph(), snapshot, CancellationToken::new())
//!   .await?;
//!
//! for (node_id, outcome) in &result.outcomes {
//!   println!("{node_id}: {outcome}");
//! }
//! ```

mod config;
mod context;
mod engine;
mod error;
mod events;
mod result;
mod runner;

pub use config::EngineConfig;
pub use context::ExecutionContext;
pub use engine::WorkflowEngine;
pub use error::ExecutionError;
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use result::{NodeOutcome, RunResult, RunStatus, SkipReason};
pub use runner::{RunnerHandle, WorkflowRunner};
